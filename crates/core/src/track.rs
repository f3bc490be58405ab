//! Shape validation for client-submitted tracks.
//!
//! A track is an arbitrary JSON object restricted to a fixed set of keys.
//! Values are stored verbatim; only the required keys are inspected, and
//! only for truthiness.

use serde_json::Value;

/// Keys every track must carry with a truthy value, checked in this order.
pub const REQUIRED_TRACK_FIELDS: [&str; 2] = ["$id", "trackUrl"];

/// Every key a track may carry.
pub const ALLOWED_TRACK_FIELDS: [&str; 15] = [
    "$id",
    "trackName",
    "authorName",
    "authorUrl",
    "trackUrl",
    "thumbnail",
    "licenseName",
    "licenseUrl",
    "volume",
    "isPublic",
    "fileId",
    "category",
    "isPremiumOnly",
    "moods",
    "tags",
];

/// A track as submitted: an order-preserving map of field name to value.
pub type Track = serde_json::Map<String, Value>;

/// The first shape violation found in a `tracks` list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("Missing or invalid parameter: tracks must be a non-empty array")]
    InvalidList,

    #[error("Track at index {index} must be an object")]
    NotAnObject { index: usize },

    #[error("Track at index {index} is missing required field: {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Track at index {index} contains unknown fields: {joined}", joined = .fields.join(", "))]
    UnknownFields { index: usize, fields: Vec<String> },
}

/// Validate the `tracks` value of a create request.
///
/// Returns the list on success. Stops at the first invalid track; later
/// tracks are never inspected.
pub fn validate_tracks(value: Option<&Value>) -> Result<&Vec<Value>, TrackError> {
    let tracks = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(TrackError::InvalidList),
    };

    for (index, track) in tracks.iter().enumerate() {
        validate_track(index, track)?;
    }

    Ok(tracks)
}

/// Validate a single track found at `index`.
pub fn validate_track(index: usize, track: &Value) -> Result<(), TrackError> {
    let Value::Object(fields) = track else {
        return Err(TrackError::NotAnObject { index });
    };

    for field in REQUIRED_TRACK_FIELDS {
        if !fields.get(field).is_some_and(is_truthy) {
            return Err(TrackError::MissingField { index, field });
        }
    }

    let unknown = unknown_fields(fields);
    if !unknown.is_empty() {
        return Err(TrackError::UnknownFields {
            index,
            fields: unknown,
        });
    }

    Ok(())
}

/// Keys of `track` outside [`ALLOWED_TRACK_FIELDS`], in their original order.
pub fn unknown_fields(track: &Track) -> Vec<String> {
    track
        .keys()
        .filter(|key| !ALLOWED_TRACK_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect()
}

/// Whether a value counts as present for a required field.
///
/// `null`, `false`, numeric zero and the empty string are falsy. Arrays and
/// objects are always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_minimal_track() {
        let tracks = json!([{"$id": "t1", "trackUrl": "http://x/a.mp3"}]);
        let validated = validate_tracks(Some(&tracks)).unwrap();
        assert_eq!(validated.len(), 1);
    }

    #[test]
    fn accepts_every_allowed_field() {
        let tracks = json!([{
            "$id": "t1",
            "trackName": "Rain",
            "authorName": "Someone",
            "authorUrl": "http://x/author",
            "trackUrl": "http://x/a.mp3",
            "thumbnail": "http://x/a.png",
            "licenseName": "CC-BY",
            "licenseUrl": "http://x/license",
            "volume": 0.5,
            "isPublic": true,
            "fileId": "f1",
            "category": "nature",
            "isPremiumOnly": false,
            "moods": ["calm"],
            "tags": []
        }]);
        assert!(validate_tracks(Some(&tracks)).is_ok());
    }

    #[test]
    fn missing_tracks_is_invalid_list() {
        assert_eq!(validate_tracks(None), Err(TrackError::InvalidList));
    }

    #[test]
    fn non_array_tracks_is_invalid_list() {
        let tracks = json!({"$id": "t1", "trackUrl": "u"});
        assert_eq!(validate_tracks(Some(&tracks)), Err(TrackError::InvalidList));
        assert_eq!(
            validate_tracks(Some(&json!("t1"))),
            Err(TrackError::InvalidList)
        );
    }

    #[test]
    fn empty_tracks_is_invalid_list() {
        assert_eq!(
            validate_tracks(Some(&json!([]))),
            Err(TrackError::InvalidList)
        );
    }

    #[test]
    fn non_object_track_is_rejected() {
        let tracks = json!([{"$id": "t1", "trackUrl": "u"}, null]);
        assert_eq!(
            validate_tracks(Some(&tracks)),
            Err(TrackError::NotAnObject { index: 1 })
        );

        let tracks = json!([["$id", "trackUrl"]]);
        assert_eq!(
            validate_tracks(Some(&tracks)),
            Err(TrackError::NotAnObject { index: 0 })
        );
    }

    #[test]
    fn id_is_checked_before_track_url() {
        let tracks = json!([{}]);
        let err = validate_tracks(Some(&tracks)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Track at index 0 is missing required field: $id"
        );
    }

    #[test]
    fn missing_track_url_is_named() {
        let tracks = json!([{"$id": "t1"}]);
        let err = validate_tracks(Some(&tracks)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Track at index 0 is missing required field: trackUrl"
        );
    }

    #[test]
    fn falsy_required_values_count_as_missing() {
        for falsy in [json!(""), json!(0), json!(null), json!(false), json!(0.0)] {
            let tracks = json!([{"$id": falsy, "trackUrl": "u"}]);
            assert_matches!(
                validate_tracks(Some(&tracks)),
                Err(TrackError::MissingField { index: 0, field: "$id" })
            );
        }
    }

    #[test]
    fn unknown_fields_listed_in_original_order() {
        let tracks = json!([{"zeta": 1, "$id": "t1", "trackUrl": "u", "foo": "bar"}]);
        let err = validate_tracks(Some(&tracks)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Track at index 0 contains unknown fields: zeta, foo"
        );
    }

    #[test]
    fn missing_field_wins_over_unknown_fields() {
        let tracks = json!([{"$id": "t1", "foo": "bar"}]);
        assert_matches!(
            validate_tracks(Some(&tracks)),
            Err(TrackError::MissingField { field: "trackUrl", .. })
        );
    }

    #[test]
    fn first_invalid_track_wins() {
        let tracks = json!([
            {"$id": "t1", "trackUrl": "u"},
            {"$id": "t2", "trackUrl": "u", "foo": "bar"},
            "not an object"
        ]);
        assert_eq!(
            validate_tracks(Some(&tracks)),
            Err(TrackError::UnknownFields {
                index: 1,
                fields: vec!["foo".to_string()],
            })
        );
    }

    #[test]
    fn truthiness_matches_expected_table() {
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-0.5)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&Value::Null));
    }
}
