//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-recipient delivery records.
    alerts (id) {
        /// Alert identifier.
        id -> Uuid,
        /// Recipient person identifier.
        recipient_id -> Uuid,
        /// Notification kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Alert title.
        #[max_length = 255]
        title -> Varchar,
        /// Alert description text.
        description -> Text,
        /// Deep link into the task view.
        #[max_length = 255]
        link -> Varchar,
        /// Structured payload.
        payload -> Jsonb,
        /// Whether the alert is flagged for the admin view.
        is_admin -> Bool,
        /// Creation timestamp (caller-localized).
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Append-only dispatch history, one row per batch.
    notification_history (id) {
        /// History entry identifier.
        id -> Uuid,
        /// Task the batch was about.
        task_id -> Uuid,
        /// Notification kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Dispatch timestamp (caller-localized).
        sent_at -> Timestamp,
        /// Serialized recipient list.
        recipients -> Jsonb,
        /// Serialized payload.
        payload -> Jsonb,
    }
}
