//! Macros for reducing boilerplate when defining entities
//!
//! Every row type carries `id` and `created_at`; rows that are edited after
//! insertion also carry `updated_at`, which `touch` refreshes.

/// Implement [`Entity`](crate::core::Entity) for a row struct
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Gift, "wedding_gifts", "gift", touch);
/// impl_entity!(GuestPhoto, "guest_photos", "photo");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ty, $table:expr, $name:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn table_name() -> &'static str {
                $table
            }

            fn entity_name() -> &'static str {
                $name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }
        }
    };

    ($type:ty, $table:expr, $name:expr, touch) => {
        impl $crate::core::entity::Entity for $type {
            fn table_name() -> &'static str {
                $table
            }

            fn entity_name() -> &'static str {
                $name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
