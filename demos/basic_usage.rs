//! Basic usage: build a catalog in code, list services, and compare two roles.

use iam_explorer::{
    CatalogQuery, ComparisonSelection, ExplorerConfig, RoleCatalog, render,
    role_with_permissions,
};

fn main() {
    #[cfg(feature = "audit")]
    iam_explorer::init_audit_logger();

    let config = ExplorerConfig::builder()
        .default_pair("roles/storage.admin", "roles/storage.objectViewer")
        .build()
        .expect("valid configuration");

    let catalog = RoleCatalog::with_config(
        vec![
            role_with_permissions! {
                name: "roles/owner",
                stage: "GA",
                permissions: ["resourcemanager.projects.delete", "storage.buckets.get"]
            },
            role_with_permissions! {
                name: "roles/storage.admin",
                stage: "GA",
                permissions: ["storage.buckets.get", "storage.objects.delete", "storage.objects.get"]
            },
            role_with_permissions! {
                name: "roles/storage.objectViewer",
                stage: "GA",
                permissions: ["storage.objects.get", "storage.objects.list"]
            },
        ],
        config,
    );

    println!("Services:");
    render::service_table(&catalog.services()).printstd();

    println!("\nPermissions for storage:");
    render::permission_table(&catalog.permission_matrix("storage"), catalog.config()).printstd();

    let mut selection = ComparisonSelection::new(&catalog);
    if let (Some(left), Some(right), Some(diff)) =
        (selection.left(), selection.right(), selection.diff())
    {
        println!();
        print!(
            "{}",
            render::render_comparison(left.name(), right.name(), diff, catalog.config())
        );
    }

    selection.set_right("ALL PERMISSIONS");
    if let Some(diff) = selection.diff() {
        println!(
            "\nroles/storage.admin lacks {} of {} known permissions",
            diff.right_only.len(),
            catalog.all_permissions().permission_count()
        );
    }

    let matches = catalog.query().search("viewer", 5);
    println!("\nRoles matching 'viewer': {}", matches.len());
}
