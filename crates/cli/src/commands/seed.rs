//! Seed the data directory with demo content.
//!
//! Writes a small set of menu items, holiday programs, and home page
//! banners so a fresh checkout has something to show. The banners
//! reference the seeded records, which is why everything is written in
//! one command.

use tracing::info;

use jungle_park_core::{BannerId, LocalizedText, MenuItemId, ProgramId, Tenge};
use jungle_park_site::models::{Banner, BannerKind, MenuItem, Program};
use jungle_park_site::store::{BannerRepository, MenuRepository, ProgramRepository};

use super::open_store;

/// Write the demo records.
///
/// Refuses to touch a data directory that already holds menu items,
/// programs, or banners unless `force` is set; with `force`, existing
/// records are deleted first.
///
/// # Errors
///
/// Returns an error when the data directory is not writable, a document
/// is corrupt, or existing records are present without `force`.
pub async fn demo_data(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let store = open_store()?;
    let menu = MenuRepository::new(&store);
    let programs = ProgramRepository::new(&store);
    let banners = BannerRepository::new(&store);

    let existing =
        menu.list().await?.len() + programs.list().await?.len() + banners.list().await?.len();
    if existing > 0 {
        if !force {
            return Err(format!(
                "data directory already holds {existing} records; rerun with --force to replace them"
            )
            .into());
        }

        info!("Removing {existing} existing records");
        for banner in banners.list().await? {
            banners.delete(banner.id).await?;
        }
        for program in programs.list().await? {
            programs.delete(program.id).await?;
        }
        for item in menu.list().await? {
            menu.delete(item.id).await?;
        }
    }

    info!("Seeding demo data");

    // Menu
    let latte = menu
        .create(item(
            ("Латте", "Латте"),
            ("Нежный кофе с молоком", "Сүт қосылған жұмсақ кофе"),
            1200,
        ))
        .await?;
    menu.create(item(
        ("Капучино", "Капучино"),
        ("Классика с плотной пенкой", "Қою көбікті классика"),
        1100,
    ))
    .await?;
    menu.create(item(
        ("Детский милкшейк", "Балалар милкшейгі"),
        ("Клубника, банан или шоколад", "Құлпынай, банан немесе шоколад"),
        1500,
    ))
    .await?;
    menu.create(item(
        ("Пицца Маргарита", "Маргарита пиццасы"),
        ("Томаты и моцарелла", "Қызанақ пен моцарелла"),
        2800,
    ))
    .await?;
    menu.create(item(
        ("Куриные наггетсы", "Тауық наггетстері"),
        ("С картофелем фри", "Фри картобымен"),
        1900,
    ))
    .await?;
    menu.create(item(
        ("Лимонад Джунгли", "Джунгли лимонады"),
        ("Фирменный, с маракуйей", "Фирмалық, маракуйямен"),
        900,
    ))
    .await?;

    // Programs
    let new_year = programs
        .create(program(
            ("Новогодняя ёлка", "Жаңа жыл шыршасы"),
            (
                "Хоровод, подарки и поздравление от Деда Мороза",
                "Хоровод, сыйлықтар және Аяз Атаның құттықтауы",
            ),
            15000,
            &["Дед Мороз", "Снегурочка"],
        ))
        .await?;
    programs
        .create(program(
            ("Пираты джунглей", "Джунгли қарақшылары"),
            (
                "Квест с поиском сокровищ по всей площадке",
                "Бүкіл алаң бойынша қазына іздеу квесті",
            ),
            25000,
            &["Пират", "Попугай"],
        ))
        .await?;
    programs
        .create(program(
            ("День рождения в джунглях", "Джунглидегі туған күн"),
            (
                "Аниматоры, игры и праздничный стол",
                "Аниматорлар, ойындар және мерекелік дастархан",
            ),
            35000,
            &["Лев", "Обезьянка", "Тигр"],
        ))
        .await?;

    // Banners
    banners
        .create(Banner {
            id: BannerId::generate(),
            kind: BannerKind::Seasonal {
                program_id: new_year.id,
                cta: LocalizedText::new("Записаться", "Тіркелу"),
            },
            title: LocalizedText::new("Запись на новогодние ёлки открыта!", "Жаңа жылдық шыршаларға тіркелу ашылды!"),
            description: LocalizedText::new(
                "Количество мест ограничено",
                "Орын саны шектеулі",
            ),
            active: true,
        })
        .await?;
    banners
        .create(Banner {
            id: BannerId::generate(),
            kind: BannerKind::Discount {
                menu_item_id: latte.id,
            },
            title: LocalizedText::new("Латте дня", "Күн латтесі"),
            description: LocalizedText::new(
                "Фирменный латте по специальной цене",
                "Фирмалық латте арнайы бағамен",
            ),
            active: true,
        })
        .await?;

    info!("Seeding complete!");
    info!("  Menu items: {}", menu.list().await?.len());
    info!("  Programs: {}", programs.list().await?.len());
    info!("  Banners: {}", banners.list().await?.len());

    Ok(())
}

fn item(title: (&str, &str), description: (&str, &str), price: i64) -> MenuItem {
    MenuItem {
        id: MenuItemId::generate(),
        title: LocalizedText::new(title.0, title.1),
        description: LocalizedText::new(description.0, description.1),
        price: Tenge::new(price),
        available: true,
    }
}

fn program(
    title: (&str, &str),
    description: (&str, &str),
    price: i64,
    costumes: &[&str],
) -> Program {
    Program {
        id: ProgramId::generate(),
        title: LocalizedText::new(title.0, title.1),
        description: LocalizedText::new(description.0, description.1),
        price: Tenge::new(price),
        available: true,
        costumes: costumes.iter().map(ToString::to_string).collect(),
    }
}
