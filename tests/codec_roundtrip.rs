use chrono::{TimeDelta, TimeZone, Utc};
use lean_types::{
    decode, decode_any, encode, LeanBytes, LeanDate, LeanFile, LeanPointer, LeanRelation,
    LeanTypesError, LeanValue, TypeTag,
};
use serde::{Deserialize, Serialize};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("lean_types=trace")
        .try_init()
        .ok();
}

fn sample_values() -> Vec<LeanValue> {
    let instant = Utc.with_ymd_and_hms(2015, 7, 14, 2, 31, 50).unwrap() + TimeDelta::milliseconds(100);
    vec![
        LeanPointer::new("Post", "55a39634e4b0ed48f0c1845c").into(),
        LeanPointer::new("", "").into(),
        LeanFile::new("543cbaede4b07db196f50f3c").into(),
        LeanFile::new("").into(),
        LeanBytes::new(Vec::new()).into(),
        LeanBytes::new("很多用户表示很喜欢我们的文档风格".as_bytes().to_vec()).into(),
        LeanBytes::new((0u8..=255).collect::<Vec<_>>()).into(),
        LeanDate::new(instant).into(),
        LeanDate::new(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()).into(),
    ]
}

#[test]
fn test_roundtrip_every_decodable_variant() -> anyhow::Result<()> {
    init_logging();

    for value in sample_values() {
        let bytes = encode(&value);
        let decoded = decode(&bytes, value.tag())?;
        assert_eq!(decoded, value, "roundtrip of {}", String::from_utf8_lossy(&bytes));

        let dispatched = decode_any(&bytes)?;
        assert_eq!(dispatched, value);
    }
    Ok(())
}

#[test]
fn test_tag_enforcement_across_variants() {
    init_logging();

    for value in sample_values() {
        let bytes = encode(&value);
        for expected in TypeTag::ALL {
            if expected == value.tag() || expected == TypeTag::Relation {
                continue;
            }
            let err = decode(&bytes, expected).unwrap_err();
            assert_eq!(
                err,
                LeanTypesError::TypeMismatch {
                    expected,
                    found: Some(value.tag().to_string()),
                }
            );
        }
    }
}

#[test]
fn test_unexpected_tag_with_matching_fields_is_rejected() {
    let err = decode(
        br#"{"__type":"Relation","className":"Post","objectId":"1"}"#,
        TypeTag::Pointer,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LeanTypesError::TypeMismatch {
            expected: TypeTag::Pointer,
            ..
        }
    ));
}

#[test]
fn test_date_roundtrip_recovers_truncated_instant() -> anyhow::Result<()> {
    let instant = Utc.with_ymd_and_hms(2015, 7, 14, 2, 31, 50).unwrap()
        + TimeDelta::microseconds(123_456);
    let date = LeanDate::new(instant);

    let bytes = encode(&date.into());
    assert_eq!(
        bytes,
        br#"{"__type":"Date","iso":"2015-07-14T02:31:50.123Z"}"#.to_vec()
    );

    let decoded = LeanDate::try_from(decode(&bytes, TypeTag::Date)?)?;
    assert_eq!(decoded, date.truncated());
    assert_eq!(
        decoded.instant(),
        Utc.with_ymd_and_hms(2015, 7, 14, 2, 31, 50).unwrap() + TimeDelta::milliseconds(123)
    );
    Ok(())
}

#[test]
fn test_relation_encodes_but_does_not_decode() {
    let relation = LeanValue::from(LeanRelation::new("Comment"));
    let bytes = encode(&relation);
    assert_eq!(
        bytes,
        br#"{"__type":"Relation","className":"Comment"}"#.to_vec()
    );
    assert_eq!(
        decode(&bytes, TypeTag::Relation).unwrap_err(),
        LeanTypesError::EncodeOnly(TypeTag::Relation)
    );
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Post {
    title: String,
    author: LeanPointer,
    picture: Option<LeanFile>,
    thumbnail: LeanBytes,
    #[serde(rename = "publishedAt")]
    published_at: LeanDate,
}

#[test]
fn test_embedded_fields_roundtrip_through_serde() -> anyhow::Result<()> {
    init_logging();

    let post = Post {
        title: "hello".to_string(),
        author: LeanPointer::new("_User", "55a39634e4b0ed48f0c1845c"),
        picture: Some(LeanFile::new("543cbaede4b07db196f50f3c")),
        thumbnail: LeanBytes::new(b"hello".to_vec()),
        published_at: LeanDate::new(
            Utc.with_ymd_and_hms(2015, 7, 14, 2, 31, 50).unwrap() + TimeDelta::milliseconds(100),
        ),
    };

    let json = serde_json::to_value(&post)?;
    assert_eq!(
        json["author"],
        serde_json::json!({"__type": "Pointer", "className": "_User", "objectId": "55a39634e4b0ed48f0c1845c"})
    );
    assert_eq!(
        json["publishedAt"],
        serde_json::json!({"__type": "Date", "iso": "2015-07-14T02:31:50.100Z"})
    );
    assert_eq!(json["thumbnail"]["base64"], "aGVsbG8=");

    let back: Post = serde_json::from_value(json)?;
    assert_eq!(back, post);
    Ok(())
}

#[test]
fn test_embedded_legacy_date_string() -> anyhow::Result<()> {
    let raw = r#"{
        "title": "legacy",
        "author": {"__type": "Pointer"},
        "picture": null,
        "thumbnail": {"__type": "Bytes", "base64": ""},
        "publishedAt": "2015-07-14T02:31:50.100Z"
    }"#;
    let post: Post = serde_json::from_str(raw)?;
    assert_eq!(post.author, LeanPointer::new("", ""));
    assert!(post.picture.is_none());
    assert!(post.thumbnail.is_empty());
    assert_eq!(
        post.published_at.instant(),
        Utc.with_ymd_and_hms(2015, 7, 14, 2, 31, 50).unwrap() + TimeDelta::milliseconds(100)
    );
    Ok(())
}

#[test]
fn test_embedded_field_error_is_reported() {
    let raw = r#"{
        "title": "broken",
        "author": {"__type": "File", "id": "x"},
        "picture": null,
        "thumbnail": {"__type": "Bytes", "base64": ""},
        "publishedAt": "2015-07-14T02:31:50.100Z"
    }"#;
    let err = serde_json::from_str::<Post>(raw).unwrap_err();
    assert!(err
        .to_string()
        .contains("Type mismatch: expected __type 'Pointer', found 'File'"));
}
