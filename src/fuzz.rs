//! Fuzzing tests that feed arbitrary names and datasets through every view.

#[cfg(test)]
mod fuzz_tests {
    use crate::{
        catalog::RoleCatalog,
        permission::Permission,
        query::CatalogQuery,
        render,
        role::Role,
        selection::ComparisonSelection,
    };
    use proptest::prelude::*;

    /// Fuzz input: raw role names and permission identifiers.
    #[derive(Debug, Clone)]
    struct FuzzRole {
        name: String,
        permissions: Vec<String>,
    }

    impl Arbitrary for FuzzRole {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
            (
                prop_oneof![
                    any::<String>(),
                    "roles/[a-z.]{0,8}",
                    "roles/[a-z]{1,6}\\.[a-zA-Z.]{0,8}",
                    Just("roles/".to_string()),
                    Just("roles/.".to_string()),
                    Just("roles/owner".to_string()),
                ],
                prop::collection::vec(any::<String>(), 0..6),
            )
                .prop_map(|(name, permissions)| FuzzRole { name, permissions })
                .boxed()
        }
    }

    impl FuzzRole {
        fn into_role(self) -> Role {
            let permissions = self
                .permissions
                .iter()
                .filter_map(|identifier| Permission::parse(identifier).ok());
            Role::new(self.name).add_permissions(permissions)
        }
    }

    proptest! {
        #[test]
        fn fuzz_views_never_panic(
            inputs in prop::collection::vec(any::<FuzzRole>(), 0..10),
            service in any::<String>(),
            query in any::<String>()
        ) {
            let roles: Vec<Role> = inputs.into_iter().map(FuzzRole::into_role).collect();
            let names: Vec<String> = roles.iter().map(|role| role.name().to_string()).collect();
            let catalog = RoleCatalog::new(roles);
            let config = catalog.config().clone();

            let services = catalog.services();
            let _ = render::service_table(&services).to_string();

            for summary in &services {
                let matrix = catalog.permission_matrix(&summary.service);
                let _ = render::permission_table(&matrix, &config).to_string();
            }
            let _ = catalog.permission_matrix(&service);

            let _ = catalog.query().search(&query, 10);

            let mut selection = ComparisonSelection::empty(&catalog);
            for pair in names.windows(2) {
                selection.set_left(&pair[0]);
                selection.set_right(&pair[1]);
                prop_assert!(selection.diff().is_some());
                if let Some(diff) = selection.diff() {
                    let _ = render::render_comparison(&pair[0], &pair[1], diff, &config);
                }
            }
        }

        #[test]
        fn fuzz_permission_parse_never_panics(identifier in any::<String>()) {
            if let Ok(permission) = Permission::parse(&identifier) {
                prop_assert_eq!(permission.as_str(), identifier.as_str());
                let _ = permission.service();
                let _ = permission.verb();
            }
        }
    }

    #[cfg(feature = "persistence")]
    proptest! {
        #[test]
        fn fuzz_dataset_parse_never_panics(json in any::<String>()) {
            let _ = crate::source::load_roles_from_str(&json);
        }

        #[test]
        fn fuzz_generated_datasets_parse(inputs in prop::collection::vec(any::<FuzzRole>(), 0..6)) {
            let roles: Vec<Role> = inputs.into_iter().map(FuzzRole::into_role).collect();
            let json = serde_json::to_string(&roles).unwrap();
            let parsed = crate::source::load_roles_from_str(&json).unwrap();
            prop_assert_eq!(parsed, roles);
        }
    }
}
