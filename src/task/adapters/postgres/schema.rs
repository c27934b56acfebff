//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with dependency links and kanban projection.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier; every query filters on it.
        owner_id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Optional parent task for sub-tasks.
        parent_task_id -> Nullable<Uuid>,
        /// Optional template provenance for generated instances.
        template_id -> Nullable<Uuid>,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Derived completion flag, kept in lockstep with `status`.
        completed -> Bool,
        /// Completion timestamp, set while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Ordered prerequisite identifiers as a JSON array.
        dependency_task_ids -> Jsonb,
        /// Whether completion requires all direct sub-tasks done.
        sub_task_completion_required -> Bool,
        /// Kanban column, the fixed projection of `status`.
        #[max_length = 50]
        kanban_column -> Varchar,
        /// Recurrence configuration payload.
        recurrence -> Jsonb,
        /// Priority level.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional category label.
        #[max_length = 255]
        category -> Nullable<Varchar>,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
        /// Optional time-of-day component of the due date.
        due_time -> Nullable<Time>,
        /// Manual ordering position within the project.
        sort_order -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
