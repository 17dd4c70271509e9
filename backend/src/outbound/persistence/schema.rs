//! Diesel table definitions.

diesel::table! {
    journal_entries (id) {
        id -> Uuid,
        user_id -> Text,
        display_name -> Text,
        body_text -> Text,
        feeling -> Text,
        summary -> Text,
        keywords -> Text,
        created_at -> Timestamptz,
    }
}
