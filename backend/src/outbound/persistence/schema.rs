//! Diesel table definitions for the PostgreSQL schema.
//!
//! The table is created and migrated by external provisioning. Keep these
//! definitions in step with that schema; `diesel print-schema` against a
//! live database regenerates them.

diesel::table! {
    /// Provisioned application builds, newest row has the highest id.
    application_details (id) {
        /// Identity primary key.
        id -> Int8,
        /// Unique application name (max 100 characters).
        application_name -> Varchar,
        /// Version string (max 50 characters).
        version -> Varchar,
        /// Free-text description (max 500 characters).
        description -> Nullable<Varchar>,
        /// Deployment environment (max 50 characters).
        environment -> Nullable<Varchar>,
        /// CI build number (max 50 characters).
        build_number -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
