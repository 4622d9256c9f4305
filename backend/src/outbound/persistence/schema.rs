//! Diesel table definitions; must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key, generated by `gen_random_uuid()`.
        id -> Uuid,
        /// Display name.
        #[max_length = 256]
        name -> Varchar,
        /// Contact address, unique across users.
        #[max_length = 256]
        email -> Varchar,
        /// Insert time.
        created_at -> Timestamptz,
        /// Time of the latest update; null until the first update.
        updated_at -> Nullable<Timestamptz>,
    }
}
