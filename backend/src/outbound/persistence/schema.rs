//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them
//! for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Freelancer accounts. `username` and `email` carry unique indexes.
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        password_digest -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    /// Clients, each owned by one user.
    clients (id) {
        id -> Integer,
        name -> Text,
        email -> Text,
        phone -> Text,
        company -> Nullable<Text>,
        address -> Nullable<Text>,
        notes -> Text,
        user_id -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    /// Shared job catalog; no owner column by design.
    jobs (id) {
        id -> Integer,
        title -> Text,
        category -> Text,
        description -> Text,
        duration -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    /// The join entity: one engagement of a client on a job by a user.
    orders (id) {
        id -> Integer,
        description -> Text,
        rate -> Text,
        location -> Text,
        start_date -> Date,
        due_date -> Date,
        status -> Text,
        user_id -> Integer,
        client_id -> Integer,
        job_id -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::joinable!(clients -> users (user_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(orders -> clients (client_id));
diesel::joinable!(orders -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(users, clients, jobs, orders,);
