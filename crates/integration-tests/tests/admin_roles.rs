//! Role gating across the admin panel and the management forms.

use jungle_park_core::Role;
use jungle_park_integration_tests::{TestSite, seed_program};
use jungle_park_site::services::auth::AuthService;
use jungle_park_site::store::{
    BannerRepository, MenuRepository, ProgramRepository, UserRepository,
};

/// Boot a site with one account per role, logged in.
async fn spawn_with_staff() -> (TestSite, String, String, String) {
    let site = TestSite::spawn().await;
    let store = site.store();
    let auth = AuthService::new(&store);
    auth.create_user("manager", "secret123", Role::Administrator)
        .await
        .expect("create manager");
    auth.create_user("barman", "secret123", Role::Bartender)
        .await
        .expect("create barman");
    auth.create_user("kassir", "secret123", Role::Cashier)
        .await
        .expect("create kassir");

    let admin = site.login("manager", "secret123").await;
    let bartender = site.login("barman", "secret123").await;
    let cashier = site.login("kassir", "secret123").await;
    (site, admin, bartender, cashier)
}

#[tokio::test]
async fn test_menu_screen_admits_bartender_not_cashier() {
    let (site, _, bartender, cashier) = spawn_with_staff().await;

    let res = site.get("/admin/menu", Some(&bartender)).await;
    assert_eq!(res.status, 200);

    let res = site.get("/admin/menu", Some(&cashier)).await;
    assert_eq!(res.status, 403);
    assert!(res.body.contains("Доступ запрещён"));
}

#[tokio::test]
async fn test_program_screen_admits_cashier_not_bartender() {
    let (site, _, bartender, cashier) = spawn_with_staff().await;

    let res = site.get("/admin/programs", Some(&cashier)).await;
    assert_eq!(res.status, 200);

    let res = site.get("/admin/programs", Some(&bartender)).await;
    assert_eq!(res.status, 403);
}

#[tokio::test]
async fn test_administrator_passes_every_gate() {
    let (site, admin, _, _) = spawn_with_staff().await;

    for path in [
        "/admin/dashboard",
        "/admin/users",
        "/admin/menu",
        "/admin/programs",
        "/admin/banners",
        "/admin/settings",
        "/admin/maintenance",
    ] {
        let res = site.get(path, Some(&admin)).await;
        assert_eq!(res.status, 200, "{path} should admit an administrator");
    }
}

#[tokio::test]
async fn test_admin_only_screens_reject_other_roles() {
    let (site, _, bartender, cashier) = spawn_with_staff().await;

    for path in ["/admin/users", "/admin/banners", "/admin/settings", "/admin/maintenance"] {
        let res = site.get(path, Some(&bartender)).await;
        assert_eq!(res.status, 403, "{path} should reject a bartender");
        let res = site.get(path, Some(&cashier)).await;
        assert_eq!(res.status, 403, "{path} should reject a cashier");
    }
}

#[tokio::test]
async fn test_bartender_creates_menu_item() {
    let (site, _, bartender, _) = spawn_with_staff().await;

    let res = site
        .post_form(
            "/admin/menu/create",
            "title_ru=Flat+White&title_kk=Flat+White&description_ru=&description_kk=&price=1300&available=on",
            Some(&bartender),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin/menu?success=menuUpdated"));

    let items = MenuRepository::new(&site.store()).list().await.expect("menu");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.ru, "Flat White");
    assert_eq!(items[0].price.amount(), 1300);
    assert!(items[0].available);
}

#[tokio::test]
async fn test_menu_create_validates_price() {
    let (site, _, bartender, _) = spawn_with_staff().await;

    let res = site
        .post_form(
            "/admin/menu/create",
            "title_ru=Latte&title_kk=&description_ru=&description_kk=&price=abc",
            Some(&bartender),
        )
        .await;
    assert_eq!(res.location(), Some("/admin/menu?error=missingFields"));

    let items = MenuRepository::new(&site.store()).list().await.expect("menu");
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_cashier_creates_program_with_costumes() {
    let (site, _, _, cashier) = spawn_with_staff().await;

    let res = site
        .post_form(
            "/admin/programs/create",
            "title_ru=Quest&title_kk=Quest&description_ru=&description_kk=&price=20000&available=on&costumes=Lion,+Tiger",
            Some(&cashier),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin/programs?success=programUpdated"));

    let programs = ProgramRepository::new(&site.store())
        .list()
        .await
        .expect("programs");
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].costumes, vec!["Lion", "Tiger"]);
}

#[tokio::test]
async fn test_admin_creates_and_deletes_staff() {
    let (site, admin, _, _) = spawn_with_staff().await;

    let res = site
        .post_form(
            "/admin/users/create",
            "username=waiter&password=secret123&role=Cashier",
            Some(&admin),
        )
        .await;
    assert_eq!(res.location(), Some("/admin/users?success=userCreated"));

    // The fresh account logs in.
    let res = site
        .post_form("/admin", "username=waiter&password=secret123", None)
        .await;
    assert_eq!(res.location(), Some("/admin/dashboard"));

    let waiter = UserRepository::new(&site.store())
        .get_by_username("waiter")
        .await
        .expect("read users")
        .expect("waiter exists");
    let res = site
        .post_form(
            &format!("/admin/users/{}/delete", waiter.id),
            "",
            Some(&admin),
        )
        .await;
    assert_eq!(res.location(), Some("/admin/users?success=userDeleted"));

    let res = site
        .post_form("/admin", "username=waiter&password=secret123", None)
        .await;
    assert_eq!(res.location(), Some("/admin?error=invalidCredentials"));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let (site, admin, _, _) = spawn_with_staff().await;

    let res = site
        .post_form(
            "/admin/users/create",
            "username=barman&password=secret123&role=Bartender",
            Some(&admin),
        )
        .await;
    assert_eq!(res.location(), Some("/admin/users?error=userExists"));
}

#[tokio::test]
async fn test_root_account_is_protected() {
    let (site, admin, _, _) = spawn_with_staff().await;

    let root = UserRepository::new(&site.store())
        .get_by_username("root")
        .await
        .expect("read users")
        .expect("root exists");

    let res = site
        .post_form(
            &format!("/admin/users/{}/role", root.id),
            "role=Cashier",
            Some(&admin),
        )
        .await;
    assert_eq!(res.location(), Some("/admin/users?error=rootProtected"));

    let res = site
        .post_form(&format!("/admin/users/{}/delete", root.id), "", Some(&admin))
        .await;
    assert_eq!(res.location(), Some("/admin/users?error=rootProtected"));

    // Still there, still an administrator.
    let root = UserRepository::new(&site.store())
        .get_by_username("root")
        .await
        .expect("read users")
        .expect("root survived");
    assert_eq!(root.role, Role::Administrator);
}

#[tokio::test]
async fn test_admin_creates_seasonal_banner() {
    let (site, admin, _, _) = spawn_with_staff().await;
    let program = seed_program(&site.store(), "Новогодняя ёлка", 15000).await;

    let res = site
        .post_form(
            "/admin/banners/create",
            &format!(
                "kind=seasonal&title_ru=Holiday+signup&title_kk=&description_ru=&description_kk=&program_id={}&menu_item_id=&cta_ru=&cta_kk=&active=on",
                program.id
            ),
            Some(&admin),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin/banners?success=bannersUpdated"));

    let banners = BannerRepository::new(&site.store()).list().await.expect("banners");
    assert_eq!(banners.len(), 1);
    assert!(banners[0].is_seasonal());
    assert!(banners[0].active);
}
