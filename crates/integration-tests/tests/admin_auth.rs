//! Admin login, the forced root password change, and logout.

use jungle_park_integration_tests::TestSite;

const ROOT_INITIAL: &str = "username=root&password=root12345";

#[tokio::test]
async fn test_login_page_renders() {
    let site = TestSite::spawn().await;

    let res = site.get("/admin", None).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Вход для сотрудников"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let site = TestSite::spawn().await;

    let res = site
        .post_form("/admin", "username=root&password=wrong-pass", None)
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin?error=invalidCredentials"));

    let res = site.get("/admin?error=invalidCredentials", None).await;
    assert!(res.body.contains("Неверный логин или пароль"));
}

#[tokio::test]
async fn test_admin_pages_require_login() {
    let site = TestSite::spawn().await;

    for path in ["/admin/dashboard", "/admin/users", "/admin/menu"] {
        let res = site.get(path, None).await;
        assert_eq!(res.status, 303, "{path} should redirect to login");
        assert_eq!(res.location(), Some("/admin"));
    }
}

#[tokio::test]
async fn test_root_must_change_password_before_anything_else() {
    let site = TestSite::spawn().await;

    let res = site.post_form("/admin", ROOT_INITIAL, None).await;
    assert_eq!(
        res.location(),
        Some("/admin/change-password?error=changePasswordPrompt")
    );
    let cookie = res.session_cookie().expect("session cookie");

    // Every admin screen defers to the password change.
    for path in ["/admin/dashboard", "/admin/users", "/admin/settings"] {
        let res = site.get(path, Some(&cookie)).await;
        assert_eq!(res.status, 303, "{path} should defer to the change screen");
        assert_eq!(res.location(), Some("/admin/change-password"));
    }

    let res = site.get("/admin/change-password", Some(&cookie)).await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn test_change_password_validations() {
    let site = TestSite::spawn().await;

    let res = site.post_form("/admin", ROOT_INITIAL, None).await;
    let cookie = res.session_cookie().expect("session cookie");

    let cases = [
        (
            "current_password=wrong&new_password=secret123&confirm_password=secret123",
            "/admin/change-password?error=currentPasswordInvalid",
        ),
        (
            "current_password=root12345&new_password=abc&confirm_password=abc",
            "/admin/change-password?error=passwordTooShort",
        ),
        (
            "current_password=root12345&new_password=secret123&confirm_password=other123",
            "/admin/change-password?error=passwordMismatch",
        ),
    ];
    for (body, expected) in cases {
        let res = site
            .post_form("/admin/change-password", body, Some(&cookie))
            .await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location(), Some(expected));
    }
}

#[tokio::test]
async fn test_successful_password_change_unlocks_the_panel() {
    let site = TestSite::spawn().await;

    let res = site.post_form("/admin", ROOT_INITIAL, None).await;
    let cookie = res.session_cookie().expect("session cookie");

    let res = site
        .post_form(
            "/admin/change-password",
            "current_password=root12345&new_password=secret123&confirm_password=secret123",
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin/dashboard?success=passwordUpdated"));

    // The same session now reaches the dashboard.
    let res = site.get("/admin/dashboard", Some(&cookie)).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Сотрудники"));

    // The initial password is burned; the new one logs in cleanly.
    let res = site.post_form("/admin", ROOT_INITIAL, None).await;
    assert_eq!(res.location(), Some("/admin?error=invalidCredentials"));

    let res = site
        .post_form("/admin", "username=root&password=secret123", None)
        .await;
    assert_eq!(res.location(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_logout_clears_the_identity() {
    let site = TestSite::spawn().await;

    let res = site.post_form("/admin", ROOT_INITIAL, None).await;
    let cookie = res.session_cookie().expect("session cookie");

    let res = site.get("/admin/logout", Some(&cookie)).await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin"));

    let res = site.get("/admin/change-password", Some(&cookie)).await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location(), Some("/admin"));
}
