//! Public page rendering, navigation, and language selection.

use jungle_park_core::{LocalizedText, MenuItemId, Tenge};
use jungle_park_integration_tests::{
    TestSite, seed_menu_item, seed_program, seed_seasonal_banner,
};
use jungle_park_site::models::MenuItem;
use jungle_park_site::store::MenuRepository;

#[tokio::test]
async fn test_health_endpoint() {
    let site = TestSite::spawn().await;

    let res = site.get("/health", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "ok");
}

#[tokio::test]
async fn test_home_page_renders_seeded_content() {
    let site = TestSite::spawn().await;
    let store = site.store();

    seed_menu_item(&store, "Латте", 1200).await;
    let program = seed_program(&store, "Пираты джунглей", 25000).await;
    let banner = seed_seasonal_banner(&store, "Новогодняя ёлка", program.id).await;

    let res = site.get("/", None).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Добро пожаловать в Jungle Park!"));
    assert!(res.body.contains("Латте"));
    assert!(res.body.contains("Пираты джунглей"));
    assert!(res.body.contains("Новогодняя ёлка"));
    // The seasonal banner carries its signup dialog.
    assert!(
        res.body
            .contains(&format!("/api/banner-signup/{}", banner.id))
    );
}

#[tokio::test]
async fn test_menu_page_hides_unavailable_items() {
    let site = TestSite::spawn().await;
    let store = site.store();

    seed_menu_item(&store, "Капучино", 1100).await;
    MenuRepository::new(&store)
        .create(MenuItem {
            id: MenuItemId::generate(),
            title: LocalizedText::new("Сезонный суп", "Маусымдық сорпа"),
            description: LocalizedText::new("", ""),
            price: Tenge::new(900),
            available: false,
        })
        .await
        .expect("seed unavailable item");

    let res = site.get("/menu", None).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Капучино"));
    assert!(!res.body.contains("Сезонный суп"));
    // The cart panel starts out empty.
    assert!(res.body.contains("id=\"cart-panel\""));
    assert!(res.body.contains("Корзина пуста"));
}

#[tokio::test]
async fn test_programs_page_offers_booking_forms() {
    let site = TestSite::spawn().await;
    let store = site.store();

    let program = seed_program(&store, "День рождения в джунглях", 35000).await;

    let res = site.get("/programs", None).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("День рождения в джунглях"));
    assert!(res.body.contains("data-api=\"/api/program-request\""));
    assert!(res.body.contains(&program.id.to_string()));
}

#[tokio::test]
async fn test_unknown_path_renders_localized_404() {
    let site = TestSite::spawn().await;

    let res = site.get("/no-such-page", None).await;
    assert_eq!(res.status, 404);
    assert!(res.body.contains("Страница не найдена"));
}

#[tokio::test]
async fn test_language_switch_persists_in_session() {
    let site = TestSite::spawn().await;

    // The default is Russian.
    let res = site.get("/", None).await;
    assert!(res.body.contains("Меню"));

    // Switching stores the choice in the session.
    let res = site.get("/?lang=kk", None).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Мәзір"));
    let cookie = res.session_cookie().expect("language switch set no cookie");

    // A plain follow-up request keeps Kazakh.
    let res = site.get("/", Some(&cookie)).await;
    assert!(res.body.contains("Мәзір"));

    // Unknown values are ignored, the stored choice wins.
    let res = site.get("/?lang=de", Some(&cookie)).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Мәзір"));
}
