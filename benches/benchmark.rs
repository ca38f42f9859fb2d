use criterion::{Criterion, criterion_group, criterion_main};
use iam_explorer::{Permission, Role, RoleCatalog, RoleDiff, aggregate_services};
use std::hint::black_box;

fn role(name: &str, permissions: impl IntoIterator<Item = String>) -> Role {
    Role::new(name).add_permissions(permissions.into_iter().map(Permission::new))
}

fn bench_role_diff(c: &mut Criterion) {
    let left = role(
        "roles/storage.admin",
        (0..200).map(|i| format!("storage.objects.p{i}")),
    );
    let right = role(
        "roles/storage.objectViewer",
        (100..300).map(|i| format!("storage.objects.p{i}")),
    );

    c.bench_function("role_diff", |b| {
        b.iter(|| black_box(RoleDiff::between(black_box(&left), black_box(&right))))
    });
}

fn bench_service_aggregation(c: &mut Criterion) {
    let roles: Vec<Role> = (0..500)
        .map(|i| role(&format!("roles/service{}.role{}", i % 40, i), Vec::new()))
        .collect();

    c.bench_function("service_aggregation", |b| {
        b.iter(|| black_box(aggregate_services(black_box(&roles))))
    });
}

fn bench_permission_matrix(c: &mut Criterion) {
    let roles: Vec<Role> = (0..20)
        .map(|i| {
            role(
                &format!("roles/compute.role{i}"),
                (0..(i * 10)).map(|p| format!("compute.instances.p{p}")),
            )
        })
        .collect();
    let catalog = RoleCatalog::new(roles);

    c.bench_function("permission_matrix", |b| {
        b.iter(|| black_box(catalog.permission_matrix(black_box("compute"))))
    });
}

criterion_group!(
    benches,
    bench_role_diff,
    bench_service_aggregation,
    bench_permission_matrix
);
criterion_main!(benches);
