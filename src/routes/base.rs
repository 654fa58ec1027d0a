use crate::models::{AccessMeta, RouteDescriptor};

/// Base Route Set
///
/// The destinations every build ships, in menu order. Access metadata is
/// declared per node and is authoritative for that node only — a child's
/// requirements are exactly what it declares, never what its parent does.
///
/// Roles used below: "admin" (operators), "user" (regular members),
/// "vip_alpha" (members with asset access).
pub fn base_routes() -> Vec<RouteDescriptor> {
    vec![
        // /login
        // The login entry point. Must stay public: it is the target of every
        // RedirectLogin decision.
        RouteDescriptor::new("/login", "login", "views/login").with_meta(AccessMeta::public()),
        // /home
        // Landing page for signed-in members.
        RouteDescriptor::new("/home", "home", "views/home").with_meta(AccessMeta::authenticated()),
        // /setting
        // Settings hub. The hub itself admits both roles; the child pages
        // narrow further where they hold per-member data.
        RouteDescriptor::new("/setting", "setting", "views/setting")
            .with_meta(AccessMeta::for_roles(["admin", "user"]))
            .with_children(vec![
                // /setting/characterSetting
                // Per-member character bindings. Members only.
                RouteDescriptor::new(
                    "characterSetting",
                    "userSetting",
                    "views/setting/characterSetting",
                )
                .with_meta(AccessMeta::for_roles(["user"])),
                // /setting/industrySetting
                RouteDescriptor::new(
                    "industrySetting",
                    "industrySetting",
                    "views/setting/industrySetting",
                )
                .with_meta(AccessMeta::for_roles(["admin", "user"])),
                // /setting/accountSetting
                // Account credentials page. Members only.
                RouteDescriptor::new(
                    "accountSetting",
                    "accountSetting",
                    "views/setting/accountSetting",
                )
                .with_meta(AccessMeta::for_roles(["user"])),
            ]),
        // /industry
        // The industry workspace. The hub and most child pages are open;
        // only the asset view is gated, to the vip_alpha role.
        RouteDescriptor::new("/industry", "industry", "views/industry").with_children(vec![
            RouteDescriptor::new("overview", "overview", "views/industry/overview"),
            // /industry/assetView
            // Corp asset listing; restricted to vip_alpha members.
            RouteDescriptor::new("assetView", "assetView", "views/industry/assetView")
                .with_meta(AccessMeta::for_roles(["vip_alpha"])),
            RouteDescriptor::new("industryPlan", "industryPlan", "views/industry/industryPlan"),
            RouteDescriptor::new(
                "flowDecomposition",
                "flowDecomposition",
                "views/industry/flowDecomposition",
            ),
            RouteDescriptor::new("workflow", "workflow", "views/industry/workflow"),
        ]),
        // /corpShop
        RouteDescriptor::new("/corpShop", "corpShop", "views/corpShop"),
        // /utils
        RouteDescriptor::new("/utils", "utils", "views/utils"),
        // /admin
        // Operator console. Every node in this subtree carries the admin
        // restriction explicitly, because requirements do not inherit.
        RouteDescriptor::new("/admin", "admin", "views/admin")
            .with_meta(AccessMeta::for_roles(["admin"]))
            .with_children(vec![
                RouteDescriptor::new(
                    "userManagement",
                    "userManagement",
                    "views/admin/userManagement",
                )
                .with_meta(AccessMeta::for_roles(["admin"])),
                RouteDescriptor::new(
                    "permissionManagement",
                    "permissionManagement",
                    "views/admin/permissionManagement",
                )
                .with_meta(AccessMeta::for_roles(["admin"])),
                RouteDescriptor::new(
                    "inviteCodeManagement",
                    "inviteCodeManagement",
                    "views/admin/inviteCodeManagement",
                )
                .with_meta(AccessMeta::for_roles(["admin"])),
                RouteDescriptor::new(
                    "vipManagement",
                    "vipManagement",
                    "views/admin/vipManagement",
                )
                .with_meta(AccessMeta::for_roles(["admin"])),
            ]),
        // /forbidden
        // The forbidden entry point. Must stay public: it is the target of
        // every RedirectForbidden decision.
        RouteDescriptor::new("/forbidden", "forbidden", "views/forbidden")
            .with_meta(AccessMeta::public()),
        // /storage/:sid
        // Shared storage links are readable without a session.
        RouteDescriptor::new("/storage/:sid", "publicStorage", "views/public/storage")
            .with_meta(AccessMeta::public()),
        // /setting/characterSetting/auth/close
        // Landing page for the external character-auth popup; opened outside
        // a session, so it must stay public despite living under /setting.
        RouteDescriptor::new(
            "/setting/characterSetting/auth/close",
            "characterAuthClose",
            "views/setting/characterAuthClose",
        )
        .with_meta(AccessMeta::public()),
    ]
}
