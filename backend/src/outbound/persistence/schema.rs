//! Diesel table definitions. These must match `migrations/` exactly.

diesel::table! {
    /// Registered users. `manager_id` is the organisational manager.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        display_name -> Varchar,
        password_hash -> Text,
        manager_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Leave requests. `manager_id` is the approving manager and is
    /// independent of `users.manager_id`.
    leave_applications (id) {
        id -> Uuid,
        applicant_id -> Uuid,
        manager_id -> Uuid,
        leave_type -> Varchar,
        start_date -> Date,
        end_date -> Date,
        reason -> Text,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, leave_applications);
