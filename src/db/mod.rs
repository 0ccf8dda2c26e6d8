// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Remote document store (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const COURSES: &str = "courses";
    /// Advertised plans. The misspelling is the live collection name.
    pub const SUBSCRIPTION_OFFERS: &str = "subscribtions";
    pub const APPOINTMENTS: &str = "appointments";

    /// Sub-collections under `users/{id}`
    pub const USER_SUBSCRIPTIONS: &str = "subscriptions";
    pub const USER_COURSES: &str = "courses";
    pub const USER_APPOINTMENTS: &str = "appointments";
}
