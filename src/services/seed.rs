//! Synthetic fixture data for development databases.
//!
//! Each table is only seeded when it is empty, so restarting a seeded
//! server leaves existing rows alone.

use chrono::{Duration, Utc};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::{
        author::CreateAuthor,
        book::CreateBook,
        category::CreateCategory,
        publication::CreatePublication,
    },
    repository::Repository,
};

const CATEGORY_NAMES: &[&str] = &[
    "Solutions", "Program", "Brand", "Security", "Research", "Marketing", "Directives",
    "Implementation", "Integration", "Functionality", "Response", "Paradigm", "Tactics",
    "Identity", "Markets", "Group", "Division", "Applications", "Optimization", "Operations",
    "Infrastructure", "Communications", "Web", "Branding", "Quality", "Assurance", "Mobility",
    "Accounts", "Data", "Creative", "Configuration", "Accountability", "Interactions",
    "Factors", "Usability", "Metrics",
];

const FIRST_NAMES: &[&str] = &[
    "Aziza", "Bobur", "Dilnoza", "Elena", "Farrukh", "Gulnora", "Hamid", "Iris", "Jasur",
    "Kamila", "Laziz", "Madina", "Nodir", "Olga", "Pavel", "Rustam", "Sabina", "Timur",
    "Umida", "Viktor",
];

const LAST_NAMES: &[&str] = &[
    "Abdullaev", "Karimova", "Petrov", "Rashidov", "Sokolova", "Tursunov", "Usmanova",
    "Yusupov", "Nazarova", "Ivanov", "Mirzaev", "Kim", "Ergasheva", "Smirnov",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "veniam",
    "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "commodo",
];

/// Publications are dated within this many years before seeding
const PUBLICATION_YEARS_BACK: i64 = 18;

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(3..=8);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, LOREM)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// Phone number in the `+998-(##) ###-##-##` format
fn phone_number<R: Rng>(rng: &mut R) -> String {
    let mut digits = || rng.gen_range(0..10).to_string();
    format!(
        "+998-({}{}) {}{}{}-{}{}-{}{}",
        digits(), digits(), digits(), digits(), digits(), digits(), digits(), digits(), digits()
    )
}

pub fn fake_category<R: Rng>(rng: &mut R) -> CreateCategory {
    CreateCategory {
        name: pick(rng, CATEGORY_NAMES).to_string(),
    }
}

pub fn fake_author<R: Rng>(rng: &mut R) -> CreateAuthor {
    let first_name = pick(rng, FIRST_NAMES).to_string();
    let last_name = pick(rng, LAST_NAMES).to_string();
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    CreateAuthor {
        first_name,
        last_name: Some(last_name),
        age: rng.gen_range(20..=40),
        email: Some(email),
        phone: Some(phone_number(rng)),
    }
}

pub fn fake_book<R: Rng>(rng: &mut R, category_id: i32) -> CreateBook {
    CreateBook {
        title: pick(rng, LOREM).to_string(),
        description: sentence(rng),
        // 1000.00 ..= 10000.00
        price: Decimal::new(rng.gen_range(100_000..=1_000_000), 2),
        category_id,
    }
}

pub fn fake_publication<R: Rng>(rng: &mut R, author_id: i32, book_id: i32) -> CreatePublication {
    let max_seconds = PUBLICATION_YEARS_BACK * 365 * 24 * 60 * 60;
    CreatePublication {
        published_date: Utc::now() - Duration::seconds(rng.gen_range(0..=max_seconds)),
        author_id,
        book_id,
    }
}

/// Seed every empty table
pub async fn run(repository: &Repository, config: &SeedConfig) -> AppResult<()> {
    let mut rng = StdRng::from_entropy();

    if repository.categories.count().await? == 0 {
        for _ in 0..config.categories {
            repository.categories.create(&fake_category(&mut rng)).await?;
        }
        tracing::info!("Seeded {} categories", config.categories);
    }

    if repository.authors.count().await? == 0 {
        for _ in 0..config.authors {
            repository.authors.create(&fake_author(&mut rng)).await?;
        }
        tracing::info!("Seeded {} authors", config.authors);
    }

    if repository.books.count().await? == 0 {
        let categories = repository.categories.list().await?;
        let mut seeded = 0;
        for category in &categories {
            let books = rng.gen_range(1..=config.max_books_per_category.max(1));
            for _ in 0..books {
                repository.books.create(&fake_book(&mut rng, category.id)).await?;
                seeded += 1;
            }
        }
        tracing::info!("Seeded {} books", seeded);
    }

    if repository.publications.count().await? == 0 {
        let author_ids: Vec<i32> = repository
            .authors
            .options()
            .await?
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        let book_ids: Vec<i32> = repository
            .books
            .options()
            .await?
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        let mut seeded = 0;
        for book_id in book_ids {
            let Some(&author_id) = author_ids.choose(&mut rng) else {
                break;
            };
            repository
                .publications
                .create(&fake_publication(&mut rng, author_id, book_id))
                .await?;
            seeded += 1;
        }
        tracing::info!("Seeded {} publications", seeded);
    }

    Ok(())
}
