//! Convenience macros for building roles in code and tests.

/// Macro for creating multiple permissions with a clean syntax.
///
/// # Examples
///
/// ```rust
/// use iam_explorer::permissions;
///
/// let perms = permissions![
///     "storage.buckets.get",
///     "storage.buckets.list",
/// ];
/// assert_eq!(perms.len(), 2);
/// ```
#[macro_export]
macro_rules! permissions {
    ($($permission:expr),* $(,)?) => {
        vec![$(
            $crate::permission::Permission::new($permission)
        ),*]
    };
}

/// Macro for creating a role with permissions in a single expression.
///
/// # Examples
///
/// ```rust
/// use iam_explorer::role_with_permissions;
///
/// let role = role_with_permissions! {
///     name: "roles/storage.objectViewer",
///     stage: "GA",
///     permissions: [
///         "storage.objects.get",
///         "storage.objects.list",
///     ]
/// };
/// assert_eq!(role.service(), Some("storage"));
/// ```
#[macro_export]
macro_rules! role_with_permissions {
    (
        name: $name:expr,
        stage: $stage:expr,
        permissions: [
            $($permission:expr),* $(,)?
        ]
    ) => {
        $crate::role::Role::new($name)
            .with_stage($stage)
            .add_permissions($crate::permissions![$($permission),*])
    };
    (
        name: $name:expr,
        permissions: [
            $($permission:expr),* $(,)?
        ]
    ) => {
        $crate::role::Role::new($name)
            .add_permissions($crate::permissions![$($permission),*])
    };
}
