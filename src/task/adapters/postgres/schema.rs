//! Diesel schema for task persistence.

diesel::table! {
    /// Work items generated per service month or created manually.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Category label, e.g. the service line's task group.
        #[max_length = 100]
        category -> Varchar,
        /// Task display name.
        #[max_length = 255]
        name -> Varchar,
        /// Calendar due date (caller-localized).
        due_date -> Date,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Soft-delete flag; rows are never removed by this core.
        is_deleted -> Bool,
        /// Optional assignee reference.
        assignee_id -> Nullable<Uuid>,
        /// Optional prerequisite task reference; not guaranteed acyclic.
        prerequisite_id -> Nullable<Uuid>,
        /// Whether the due date must not move.
        is_fixed_deadline -> Bool,
        /// Whether the due date was adjusted along the chain.
        due_date_adjusted -> Bool,
        /// Why the due date was adjusted, if it was.
        adjustment_reason -> Nullable<Text>,
        /// Optional owning client-service engagement.
        client_service_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// People who can be assigned work or receive notifications.
    persons (id) {
        /// Person identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        full_name -> Varchar,
    }
}

diesel::table! {
    /// Client-service engagements tasks belong to.
    client_services (id) {
        /// Engagement identifier.
        id -> Uuid,
        /// Client display name.
        #[max_length = 255]
        client_name -> Varchar,
        /// Service display name.
        #[max_length = 255]
        service_name -> Varchar,
        /// Person responsible for the client, if any.
        client_assignee_id -> Nullable<Uuid>,
    }
}
