//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations under
//! `backend/migrations` exactly. `diesel print-schema` regenerates them from
//! a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        name -> Text,
        /// Unique across all users (`users_email_key`).
        email -> Text,
        /// Self-contained bcrypt hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contacts owned by a single user.
    ///
    /// `(owner_id, email)` and `(owner_id, phone)` carry unique constraints.
    contacts (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Text,
        email -> Text,
        phone -> Text,
        /// Free-form classification exposed as `type`.
        contact_type -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(contacts -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(contacts, users);
