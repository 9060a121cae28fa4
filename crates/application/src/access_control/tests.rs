use std::sync::Arc;

use lotus_domain::{AccessOperation, PermissionLevel, Principal, RoleCollection};

use crate::test_support::{FakeRoleRegistry, client, locale, manager, manager_with_access, role};
use crate::{
    AccessArgs, AccessOverrides, AccessService, AccessSettings, PermissionCache,
    RoleBasedAccessOptions,
};

fn service() -> AccessService {
    let registry = FakeRoleRegistry::new(vec![
        role(
            "lessons-editor",
            RoleCollection::Managers,
            &[(
                "lessons",
                &[
                    PermissionLevel::Read,
                    PermissionLevel::Create,
                    PermissionLevel::Update,
                    PermissionLevel::Delete,
                ],
            )],
        ),
        role(
            "translator",
            RoleCollection::Managers,
            &[("lessons", &[PermissionLevel::Translate])],
        ),
        role(
            "we-meditate-app",
            RoleCollection::Clients,
            &[(
                "lessons",
                &[PermissionLevel::Read, PermissionLevel::Delete],
            )],
        ),
    ]);
    AccessService::new(Arc::new(registry), AccessSettings::default())
}

#[test]
fn generated_predicates_follow_role_grants() {
    let service = service();
    let access = service.role_based_access("lessons", RoleBasedAccessOptions::default());
    let editor = Principal::Manager(manager("m-1", &[("en", &["lessons-editor"])]));
    let cache = PermissionCache::new();
    let args = AccessArgs::new(Some(&editor), &cache);

    for operation in AccessOperation::all() {
        assert!(access.evaluate(*operation, &args));
    }

    let anonymous = AccessArgs::new(None, &cache);
    for operation in AccessOperation::all() {
        assert!(!access.evaluate(*operation, &anonymous));
    }
}

#[test]
fn read_uses_implicit_read_and_locale_filter() {
    let service = service();
    let access = service.role_based_access("pages", RoleBasedAccessOptions::default());
    let editor = Principal::Manager(manager("m-2", &[("en", &["lessons-editor"])]));
    let app = Principal::Client(client("c-1", &["we-meditate-app"]));
    let cache = PermissionCache::new();

    assert!((access.read)(&AccessArgs::new(Some(&editor), &cache)));
    assert!(!(access.read)(&AccessArgs::new(Some(&app), &cache)));
}

#[test]
fn read_without_implicit_read_needs_a_grant() {
    let service = service();
    let access = service.role_based_access(
        "pages",
        RoleBasedAccessOptions::default().without_implicit_read(),
    );
    let editor = Principal::Manager(manager("m-3", &[("en", &["lessons-editor"])]));
    let cache = PermissionCache::new();

    assert!(!(access.read)(&AccessArgs::new(Some(&editor), &cache)));
}

#[test]
fn client_read_passes_locale_filter_once_permissions_are_known() {
    let service = service();
    let access = service.role_based_access("lessons", RoleBasedAccessOptions::default());
    let app = Principal::Client(client("c-2", &["we-meditate-app"]));
    let cache = PermissionCache::new();

    assert!((access.read)(&AccessArgs::new(Some(&app), &cache)));
    assert!(!(access.delete)(&AccessArgs::new(Some(&app), &cache)));
}

#[test]
fn update_uses_request_locale_and_document_id() {
    let service = service();
    let access = service.role_based_access("lessons", RoleBasedAccessOptions::default());
    let user = manager_with_access(
        "m-4",
        &[("en", &["lessons-editor"]), ("cs", &["translator"])],
        &[("pages", "9")],
    );
    let cache = PermissionCache::new();
    let czech = locale("cs");

    let english_args = AccessArgs::new(Some(&user), &cache);
    let czech_args = AccessArgs::new(Some(&user), &cache).with_locale(Some(&czech));
    assert!((access.update)(&english_args));
    assert!((access.update)(&czech_args));
    assert!(!(access.create)(&czech_args));
    assert!(!(access.delete)(&czech_args));

    let pages = service.role_based_access("pages", RoleBasedAccessOptions::default());
    let listed = AccessArgs::new(Some(&user), &cache).with_id(Some("9"));
    let unlisted = AccessArgs::new(Some(&user), &cache).with_id(Some("10"));
    assert!((pages.update)(&listed));
    assert!(!(pages.update)(&unlisted));
}

#[test]
fn disable_delete_denies_even_admins() {
    let service = service();
    let access = service.role_based_access(
        "lessons",
        RoleBasedAccessOptions::default().disable_delete(),
    );
    let mut admin = manager("m-5", &[]);
    admin.admin = true;
    let admin = Principal::Manager(admin);
    let cache = PermissionCache::new();
    let args = AccessArgs::new(Some(&admin), &cache);

    assert!(!(access.delete)(&args));
    assert!((access.update)(&args));
}

#[test]
fn overrides_replace_only_the_named_operation() {
    let service = service();
    let overrides = AccessOverrides {
        read: Some(Arc::new(|_: &AccessArgs<'_>| true)),
        ..AccessOverrides::default()
    };
    let access = service.role_based_access(
        "lessons",
        RoleBasedAccessOptions {
            overrides,
            ..RoleBasedAccessOptions::default()
        },
    );
    let cache = PermissionCache::new();
    let anonymous = AccessArgs::new(None, &cache);

    assert!((access.read)(&anonymous));
    assert!(!(access.create)(&anonymous));
    assert!(!(access.update)(&anonymous));
}

#[test]
fn field_access_applies_translate_carve_out() {
    let service = service();
    let translator = Principal::Manager(manager("m-6", &[("en", &["translator"])]));
    let cache = PermissionCache::new();
    let args = AccessArgs::new(Some(&translator), &cache);

    let localized = service.create_field_access("lessons", true);
    assert!((localized.read)(&args));
    assert!((localized.update)(&args));
    assert!(!(localized.create)(&args));

    let shared = service.create_field_access("lessons", false);
    assert!((shared.read)(&args));
    assert!(!(shared.update)(&args));
}
