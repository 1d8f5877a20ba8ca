//! Diesel schema definitions.

diesel::table! {
    recipients (owner_id) {
        owner_id -> Text,
        role -> Nullable<Text>,
        device_tokens -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}
