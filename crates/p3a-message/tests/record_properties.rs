use chrono::{DateTime, TimeZone, Utc};
use p3a_interfaces::{MessageMetainfo, SeparatorPolicy};
use p3a_message::{
    LINUX_COUNTRIES, NOTABLE_COUNTRIES, STAR_ATTRIBUTE_COUNT, StarFormat,
    apply_anonymization_policy, format_json_message, format_star_message,
};

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn example_meta() -> MessageMetainfo {
    MessageMetainfo {
        country_code: "XX".to_string(),
        platform: "linux-bc".to_string(),
        version: "1.0".to_string(),
        channel: "release".to_string(),
        refcode: "BRV002".to_string(),
        woi: 5,
        wos: 6,
        date_of_install: noon(2023, 1, 1),
        date_of_survey: noon(2023, 1, 8),
    }
}

fn with(platform: &str, country: &str) -> MessageMetainfo {
    MessageMetainfo {
        platform: platform.to_string(),
        country_code: country.to_string(),
        ..example_meta()
    }
}

#[test]
fn worked_example_end_to_end() {
    let mut meta = example_meta();
    apply_anonymization_policy(&mut meta);
    assert_eq!(meta.country_code, "other");
    assert_eq!(meta.refcode, "none");

    let json = format_json_message("test.metric", 42, &meta).unwrap();
    assert_eq!(json.country_code, "other");
    assert_eq!(json.yoi, 2023);
    assert_eq!(json.yos, 2023);

    let format = StarFormat::new("=", "|", SeparatorPolicy::Permissive).unwrap();
    let star = format_star_message("test.metric", 42, &meta, &format).unwrap();
    assert_eq!(
        star,
        "metric_name=test.metric|metric_value=42|version=1.0|yoi=2023|channel=release|\
         platform=linux-bc|country_code=other|woi=5"
    );
}

#[test]
fn allow_listed_countries_pass_unchanged() {
    for country in LINUX_COUNTRIES {
        let mut meta = with("linux-bc", country);
        apply_anonymization_policy(&mut meta);
        assert_eq!(meta.country_code, *country);
    }
    for platform in ["winx64-bc", "osx-bc", "android-bc", "ios", ""] {
        for country in NOTABLE_COUNTRIES {
            let mut meta = with(platform, country);
            apply_anonymization_policy(&mut meta);
            assert_eq!(meta.country_code, *country);
        }
    }
}

#[test]
fn border_countries_flip_with_platform() {
    let linux_only: Vec<&str> = LINUX_COUNTRIES
        .iter()
        .copied()
        .filter(|c| !NOTABLE_COUNTRIES.contains(c))
        .collect();
    let notable_only: Vec<&str> = NOTABLE_COUNTRIES
        .iter()
        .copied()
        .filter(|c| !LINUX_COUNTRIES.contains(c))
        .collect();
    assert_eq!(linux_only, ["CH", "ZA", "SE", "BE"]);
    assert_eq!(notable_only, ["PH", "ID", "KR", "AR"]);

    for country in linux_only {
        let mut linux = with("linux-bc", country);
        let mut mac = with("osx-bc", country);
        apply_anonymization_policy(&mut linux);
        apply_anonymization_policy(&mut mac);
        assert_eq!(linux.country_code, country);
        assert_eq!(mac.country_code, "other");
    }
    for country in notable_only {
        let mut linux = with("linux-bc", country);
        let mut win = with("winx64-bc", country);
        apply_anonymization_policy(&mut linux);
        apply_anonymization_policy(&mut win);
        assert_eq!(linux.country_code, "other");
        assert_eq!(win.country_code, country);
    }
}

#[test]
fn policy_is_idempotent() {
    for (platform, country) in [
        ("linux-bc", "CH"),
        ("linux-bc", "PH"),
        ("osx-bc", "KR"),
        ("osx-bc", "XX"),
        ("ios", "other"),
    ] {
        let mut once = with(platform, country);
        apply_anonymization_policy(&mut once);
        let mut twice = once.clone();
        apply_anonymization_policy(&mut twice);
        assert_eq!(once, twice);
    }
}

#[test]
fn star_record_always_has_eight_pairs() {
    let meta = MessageMetainfo {
        version: String::new(),
        channel: String::new(),
        platform: String::new(),
        country_code: String::new(),
        ..example_meta()
    };
    let star = format_star_message("m", 0, &meta, &StarFormat::default()).unwrap();
    let pairs: Vec<&str> = star.split(';').collect();
    assert_eq!(pairs.len(), STAR_ATTRIBUTE_COUNT);
    assert_eq!(
        pairs,
        [
            "metric_name|m",
            "metric_value|0",
            "version|",
            "yoi|2023",
            "channel|",
            "platform|",
            "country_code|",
            "woi|5"
        ]
    );
}

#[test]
fn json_record_serializes_in_fixed_order() {
    let mut meta = example_meta();
    apply_anonymization_policy(&mut meta);
    let json = format_json_message("test.metric", 42, &meta)
        .unwrap()
        .to_json_string()
        .unwrap();
    assert_eq!(
        json,
        r#"{"yos":2023,"yoi":2023,"country_code":"other","platform":"linux-bc","version":"1.0","channel":"release","woi":5,"wos":6,"metric_name":"test.metric","metric_value":42}"#
    );
}
