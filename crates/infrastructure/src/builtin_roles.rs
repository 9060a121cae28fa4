//! Role tables shipped with the meditation platform.

use lotus_core::AppResult;
use lotus_domain::{PermissionLevel, RoleCollection, RoleDefinition};

use PermissionLevel::{Create, Delete, Read, Translate, Update};

struct BuiltinRole {
    slug: &'static str,
    label: &'static str,
    project: Option<&'static str>,
    permissions: &'static [(&'static str, &'static [PermissionLevel])],
}

const FULL: &[PermissionLevel] = &[Read, Create, Update, Delete];
const EDIT: &[PermissionLevel] = &[Read, Create, Update];
const UPLOAD: &[PermissionLevel] = &[Read, Create];
const VIEW: &[PermissionLevel] = &[Read];
const TRANSLATE: &[PermissionLevel] = &[Translate];

const MANAGER_ROLES: &[BuiltinRole] = &[
    BuiltinRole {
        slug: "meditations-editor",
        label: "Meditations Editor",
        project: Some("wemeditate"),
        permissions: &[("meditations", EDIT), ("images", UPLOAD)],
    },
    BuiltinRole {
        slug: "pages-editor",
        label: "Pages Editor",
        project: Some("wemeditate"),
        permissions: &[
            ("pages", FULL),
            ("images", UPLOAD),
            ("authors", VIEW),
            ("tags", UPLOAD),
        ],
    },
    BuiltinRole {
        slug: "lessons-editor",
        label: "Lessons Editor",
        project: Some("wemeditate"),
        permissions: &[
            ("lessons", EDIT),
            ("file-attachments", UPLOAD),
            ("music", VIEW),
        ],
    },
    BuiltinRole {
        slug: "music-editor",
        label: "Music Editor",
        project: Some("wemeditate"),
        permissions: &[("music", FULL), ("tags", UPLOAD)],
    },
    BuiltinRole {
        slug: "media-librarian",
        label: "Media Librarian",
        project: Some("wemeditate"),
        permissions: &[
            ("media", FULL),
            ("images", FULL),
            ("file-attachments", EDIT),
        ],
    },
    BuiltinRole {
        slug: "authors-editor",
        label: "Authors Editor",
        project: Some("wemeditate"),
        permissions: &[("authors", EDIT), ("images", UPLOAD)],
    },
    BuiltinRole {
        slug: "translator",
        label: "Translator",
        project: Some("wemeditate"),
        permissions: &[
            ("pages", TRANSLATE),
            ("meditations", TRANSLATE),
            ("lessons", TRANSLATE),
            ("music", TRANSLATE),
            ("media", TRANSLATE),
            ("authors", TRANSLATE),
            ("tags", TRANSLATE),
        ],
    },
    BuiltinRole {
        slug: "subtitles-editor",
        label: "Subtitles Editor",
        project: Some("wemeditate"),
        permissions: &[("file-attachments", EDIT), ("lessons", VIEW)],
    },
    BuiltinRole {
        slug: "events-editor",
        label: "Events Editor",
        project: Some("atlas"),
        permissions: &[("events", FULL), ("venues", EDIT), ("images", UPLOAD)],
    },
    BuiltinRole {
        slug: "wemeditate-viewer",
        label: "We Meditate Viewer",
        project: Some("wemeditate"),
        permissions: &[
            ("pages", VIEW),
            ("meditations", VIEW),
            ("lessons", VIEW),
            ("music", VIEW),
        ],
    },
];

const CLIENT_ROLES: &[BuiltinRole] = &[
    BuiltinRole {
        slug: "we-meditate-web",
        label: "We Meditate Web",
        project: None,
        permissions: &[
            ("pages", VIEW),
            ("meditations", VIEW),
            ("music", VIEW),
            ("lessons", VIEW),
            ("authors", VIEW),
            ("tags", VIEW),
            ("media", VIEW),
            ("images", VIEW),
        ],
    },
    BuiltinRole {
        slug: "we-meditate-app",
        label: "We Meditate App",
        project: None,
        permissions: &[
            ("meditations", VIEW),
            ("music", VIEW),
            ("lessons", VIEW),
            ("images", VIEW),
            ("file-attachments", VIEW),
        ],
    },
    BuiltinRole {
        slug: "atlas-sync",
        label: "Atlas Sync",
        project: None,
        permissions: &[("events", EDIT), ("venues", EDIT)],
    },
    BuiltinRole {
        slug: "content-importer",
        label: "Content Importer",
        project: None,
        permissions: &[
            ("pages", FULL),
            ("meditations", FULL),
            ("music", FULL),
            ("media", FULL),
            ("images", FULL),
        ],
    },
];

pub(crate) fn manager_roles() -> AppResult<Vec<RoleDefinition>> {
    build(MANAGER_ROLES, RoleCollection::Managers)
}

pub(crate) fn client_roles() -> AppResult<Vec<RoleDefinition>> {
    build(CLIENT_ROLES, RoleCollection::Clients)
}

fn build(table: &[BuiltinRole], role_collection: RoleCollection) -> AppResult<Vec<RoleDefinition>> {
    table
        .iter()
        .map(|builtin| {
            let permissions = builtin
                .permissions
                .iter()
                .map(|(collection, levels)| ((*collection).to_owned(), levels.to_vec()));
            let role = RoleDefinition::new(builtin.slug, role_collection, permissions)?
                .with_label(builtin.label);
            match builtin.project {
                Some(project) => role.with_project(project),
                None => Ok(role),
            }
        })
        .collect()
}
