//! Diesel schema for recurring task template persistence.

diesel::table! {
    /// Recurring task templates.
    recurring_task_templates (id) {
        /// Template identifier.
        id -> Uuid,
        /// Owning user identifier; every query filters on it.
        owner_id -> Uuid,
        /// Project generated instances land in.
        project_id -> Uuid,
        /// Display name copied onto instances.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description copied onto instances.
        description -> Nullable<Text>,
        /// Priority copied onto instances.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional category copied onto instances.
        #[max_length = 255]
        category -> Nullable<Varchar>,
        /// Optional due time copied onto instances.
        due_time -> Nullable<Time>,
        /// Recurrence pattern payload.
        pattern -> Jsonb,
        /// Whether the template still generates instances.
        is_active -> Bool,
        /// Most recent generation date.
        last_generated_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
