//! End-to-end tests for the Jungle Park site.
//!
//! Each test boots the full router (session layer, maintenance gate,
//! routes) over a throwaway data directory, then talks to it over plain
//! HTTP/1.1 the way a browser would: cookies carried by hand, admin
//! forms as `application/x-www-form-urlencoded`, the visitor API as
//! JSON.
//!
//! The JSON documents stay inspectable from the outside through
//! [`TestSite::store`], which opens the same data directory the server
//! re-reads on every request.

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use jungle_park_core::{BannerId, LocalizedText, MenuItemId, ProgramId, Tenge};
use jungle_park_site::config::SiteConfig;
use jungle_park_site::models::{Banner, BannerKind, MenuItem, Program};
use jungle_park_site::state::AppState;
use jungle_park_site::store::{
    BannerRepository, JsonStore, MenuRepository, ProgramRepository, SettingsRepository,
};
use jungle_park_site::{app, bootstrap};

/// A running site instance bound to an ephemeral port.
///
/// Dropping the value removes the data directory; the spawned server
/// task dies with the test runtime.
pub struct TestSite {
    addr: SocketAddr,
    data_dir: tempfile::TempDir,
}

impl TestSite {
    /// Boot the site over an empty data directory.
    ///
    /// `bootstrap` runs as in production, so `settings.json` exists
    /// with its defaults and the `root` administrator is provisioned
    /// with the built-in initial password.
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("tempdir");
        let config = SiteConfig {
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            base_url: "http://localhost".to_string(),
            data_dir: data_dir.path().to_path_buf(),
            root_password: None,
        };
        let state = AppState::new(config).expect("app state");
        bootstrap(&state).await.expect("bootstrap");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let app = app(state);
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self { addr, data_dir }
    }

    /// The directory the running site reads its documents from.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Store handle over the same documents the site serves.
    ///
    /// The site re-reads the files on every request, so records written
    /// here are visible to the next request without a restart.
    #[must_use]
    pub fn store(&self) -> JsonStore {
        JsonStore::new(self.data_dir.path())
    }

    /// GET `path`, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.send("GET", path, cookie, None).await
    }

    /// POST a urlencoded form body.
    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> TestResponse {
        self.send(
            "POST",
            path,
            cookie,
            Some(("application/x-www-form-urlencoded", body.to_owned())),
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        cookie: Option<&str>,
    ) -> TestResponse {
        self.send("POST", path, cookie, Some(("application/json", body.to_string())))
            .await
    }

    /// Log in through the real form and return the session cookie.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = format!("username={username}&password={password}");
        let res = self.post_form("/admin", &body, None).await;
        assert_eq!(res.status, 303, "login did not redirect: {}", res.head);
        res.session_cookie().expect("login set no session cookie")
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        body: Option<(&str, String)>,
    ) -> TestResponse {
        let mut stream = tokio::net::TcpStream::connect(self.addr)
            .await
            .expect("connect server");

        let mut req = format!(
            "{method} {path} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
            self.addr
        );
        if let Some(cookie) = cookie {
            req.push_str(&format!("Cookie: {cookie}\r\n"));
        }
        match body {
            Some((content_type, payload)) => {
                req.push_str(&format!(
                    "Content-Type: {content_type}\r\nContent-Length: {}\r\n\r\n{payload}",
                    payload.len()
                ));
            }
            None => req.push_str("\r\n"),
        }

        stream
            .write_all(req.as_bytes())
            .await
            .expect("write request");
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.expect("read response");

        let (head, body) = raw
            .split_once("\r\n\r\n")
            .expect("http response must have separator");
        let status = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|s| s.parse::<u16>().ok())
            .expect("http status");

        TestResponse {
            status,
            head: head.to_string(),
            body: body.to_string(),
        }
    }
}

/// A raw HTTP response split into status, header block, and body.
pub struct TestResponse {
    pub status: u16,
    pub head: String,
    pub body: String,
}

impl TestResponse {
    /// Value of the first header with this name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }

    /// `Location` target of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// The session cookie pair from `Set-Cookie`, ready to send back.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if !key.eq_ignore_ascii_case("set-cookie") {
                return None;
            }
            let pair = value.trim().split(';').next()?;
            if pair.starts_with("jp_session=") {
                Some(pair.to_owned())
            } else {
                None
            }
        })
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("json body")
    }
}

// =============================================================================
// Seeding Helpers
// =============================================================================

/// Flip the owner authorization switch the cashier would flip.
pub async fn authorize_owner(store: &JsonStore) {
    SettingsRepository::new(store)
        .set_owner_authorized(true)
        .await
        .expect("authorize owner");
}

/// Create a menu item priced in tenge, available by default.
pub async fn seed_menu_item(store: &JsonStore, title_ru: &str, price: i64) -> MenuItem {
    MenuRepository::new(store)
        .create(MenuItem {
            id: MenuItemId::generate(),
            title: LocalizedText::new(title_ru, title_ru),
            description: LocalizedText::new("", ""),
            price: Tenge::new(price),
            available: true,
        })
        .await
        .expect("seed menu item")
}

/// Create a bookable holiday program.
pub async fn seed_program(store: &JsonStore, title_ru: &str, price: i64) -> Program {
    ProgramRepository::new(store)
        .create(Program {
            id: ProgramId::generate(),
            title: LocalizedText::new(title_ru, title_ru),
            description: LocalizedText::new("", ""),
            price: Tenge::new(price),
            available: true,
            costumes: Vec::new(),
        })
        .await
        .expect("seed program")
}

/// Create an active seasonal banner pointing at `program_id`.
pub async fn seed_seasonal_banner(
    store: &JsonStore,
    title_ru: &str,
    program_id: ProgramId,
) -> Banner {
    BannerRepository::new(store)
        .create(Banner {
            id: BannerId::generate(),
            kind: BannerKind::Seasonal {
                program_id,
                cta: LocalizedText::new("Записаться", "Тіркелу"),
            },
            title: LocalizedText::new(title_ru, title_ru),
            description: LocalizedText::new("", ""),
            active: true,
        })
        .await
        .expect("seed seasonal banner")
}

/// Create an active discount banner pointing at `menu_item_id`.
pub async fn seed_discount_banner(
    store: &JsonStore,
    title_ru: &str,
    menu_item_id: MenuItemId,
) -> Banner {
    BannerRepository::new(store)
        .create(Banner {
            id: BannerId::generate(),
            kind: BannerKind::Discount { menu_item_id },
            title: LocalizedText::new(title_ru, title_ru),
            description: LocalizedText::new("", ""),
            active: true,
        })
        .await
        .expect("seed discount banner")
}
