//! # Seed Data Generator
//!
//! Populates one user's document tree with sample records for development.
//!
//! ## Usage
//! ```bash
//! # Seed the tree of user "dev-user" in ./logipro_dev.db
//! cargo run -p logipro-store --bin seed
//!
//! # Create an approved account and seed its tree
//! cargo run -p logipro-store --bin seed -- --email dev@example.com --password Gelistirme1
//!
//! # First admin account (approves everyone else)
//! cargo run -p logipro-store --bin seed -- --email admin@example.com --password Yonetici1 --admin
//!
//! # Custom database / job count
//! cargo run -p logipro-store --bin seed -- --db ./data/logipro.db --jobs 200
//! ```
//!
//! ## Generated Records
//! - carriers with valid phones, plates and national ids
//! - client companies
//! - planned jobs between Turkish cities, dated from today on
//! - completed jobs, every other one with commission paid
//! - carrier availability posts
//! - IBANs with correct mod-97 check digits

use chrono::{Days, Local, Utc};
use std::env;

use logipro_core::{
    Carrier, CarrierAvailability, CompletedJob, Company, Iban, PlannedJob, VehicleType,
};
use logipro_store::{Database, DbConfig};

const CITIES: &[&str] = &[
    "İstanbul", "Ankara", "İzmir", "Bursa", "Antalya", "Konya", "Adana", "Mersin", "Kayseri",
    "Samsun", "Gaziantep", "Eskişehir", "Trabzon", "Denizli", "Kocaeli",
];

const CARGO: &[(&str, &str)] = &[
    ("Demir", "24"),
    ("Mermer", "26,5"),
    ("Narenciye", "20"),
    ("Un", "25"),
    ("Tekstil", "12,75"),
    ("Beyaz eşya", "9"),
    ("İnşaat malzemesi", "22"),
    ("Kuru gıda", "18,5"),
];

const CARRIERS: &[(&str, VehicleType)] = &[
    ("Mehmet Yılmaz", VehicleType::Tir),
    ("Ahmet Kaya", VehicleType::Kamyon),
    ("Mustafa Demir", VehicleType::Tir),
    ("Hasan Çelik", VehicleType::Frigorifik),
    ("Hüseyin Şahin", VehicleType::Lowbed),
    ("İbrahim Yıldız", VehicleType::Kamyonet),
];

const COMPANIES: &[(&str, &str)] = &[
    ("Anadolu Demir Çelik A.Ş.", "Selim Aydın"),
    ("Ege Narenciye Ltd.", "Zeynep Arslan"),
    ("Marmara Tekstil", "Elif Koç"),
    ("Toros Un Sanayi", "Murat Öztürk"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./logipro_dev.db");
    let mut user_id = String::from("dev-user");
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut job_count: usize = 24;
    let mut admin = false;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--db" | "-d" => {
                if let Some(v) = value {
                    db_path = v;
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if let Some(v) = value {
                    user_id = v;
                    i += 1;
                }
            }
            "--email" => {
                email = value;
                i += 1;
            }
            "--password" => {
                password = value;
                i += 1;
            }
            "--admin" => admin = true,
            "--jobs" | "-j" => {
                if let Some(v) = value {
                    job_count = v.parse().unwrap_or(job_count);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("LogisticsPRO Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./logipro_dev.db)");
                println!("  -u, --user <UID>       User id whose tree is seeded (default: dev-user)");
                println!("      --email <EMAIL>    Create an approved account and seed it instead");
                println!("      --password <PASS>  Password for --email");
                println!("      --admin            Give the --email account admin rights");
                println!("  -j, --jobs <N>         Planned and completed jobs each (default: 24)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 LogisticsPRO Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    if let (Some(email), Some(password)) = (email, password) {
        let user = db.users().create(&email, &password, admin).await?;
        db.users().approve(&user.id).await?;
        let role = if admin { "admin" } else { "broker" };
        println!("✓ Created approved {} account {} ({})", role, user.email, user.id);
        user_id = user.id;
    }
    println!("User: {}", user_id);

    let carriers = db.collection::<Carrier>(user_id.as_str());
    if carriers.count().await? > 0 {
        println!("⚠ This user already has carriers; skipping seed to avoid duplicates.");
        return Ok(());
    }

    let now = Utc::now();
    let today = Local::now().date_naive();

    // Carriers
    let mut carrier_ids = Vec::new();
    for (idx, (name, vehicle_type)) in CARRIERS.iter().enumerate() {
        let carrier = Carrier {
            id: String::new(),
            name: name.to_string(),
            phone: format!("53{:08}", 21_234_567 + idx * 1_111),
            national_id: Some(national_id(100_000_000 + idx as u64 * 7_919)),
            plate: format!("{:02} {} {}", 34 + idx, ["ABC", "KLM", "TRS"][idx % 3], 100 + idx),
            dorse_plate: (idx % 2 == 0).then(|| format!("{:02} DR {}", 34 + idx, 500 + idx)),
            vehicle_type: *vehicle_type,
            created_at: now,
            updated_at: now,
        };
        carrier_ids.push(carriers.insert(carrier).await?.id);
    }
    println!("✓ {} carriers", carrier_ids.len());

    // Companies
    let companies = db.collection::<Company>(user_id.as_str());
    let mut company_ids = Vec::new();
    for (idx, (name, contact)) in COMPANIES.iter().enumerate() {
        let company = Company {
            id: String::new(),
            name: name.to_string(),
            phone: format!("54{:08}", 30_000_000 + idx * 4_321),
            address: format!("{} Organize Sanayi Bölgesi", CITIES[idx % CITIES.len()]),
            contact_person: contact.to_string(),
            created_at: now,
            updated_at: now,
        };
        company_ids.push(companies.insert(company).await?.id);
    }
    println!("✓ {} companies", company_ids.len());

    // Planned and completed jobs
    let planned = db.collection::<PlannedJob>(user_id.as_str());
    let completed = db.collection::<CompletedJob>(user_id.as_str());
    for n in 0..job_count {
        let (cargo, tonnage) = CARGO[n % CARGO.len()];
        let from = CITIES[n % CITIES.len()];
        let to = CITIES[(n * 7 + 3) % CITIES.len()];
        let transport = 8_000 + (n * 1_250) % 20_000;

        let offset = (n % 30) as u64;
        let loading = today.checked_add_days(Days::new(offset)).unwrap_or(today);
        let delivery = loading.checked_add_days(Days::new(2)).unwrap_or(loading);

        let job = PlannedJob {
            id: String::new(),
            company_id: company_ids[n % company_ids.len()].clone(),
            cargo_type: cargo.to_string(),
            tonnage: tonnage.to_string(),
            dimensions: None,
            loading_location: from.to_string(),
            delivery_location: to.to_string(),
            loading_date: loading,
            delivery_date: delivery,
            transportation_cost: transport.to_string(),
            commission_cost: (transport / 10).to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        };

        // Mirror each plan into the past as a completed job.
        let past_loading = today.checked_sub_days(Days::new(offset + 10)).unwrap_or(today);
        let past_delivery = past_loading.checked_add_days(Days::new(2)).unwrap_or(past_loading);
        let mut done = CompletedJob::from_planned(
            &job,
            carrier_ids[n % carrier_ids.len()].clone(),
            past_delivery,
            now,
        );
        done.loading_date = past_loading;
        done.delivery_date = past_delivery;
        done.commission_paid = n % 2 == 0;

        planned.insert(job).await?;
        completed.insert(done).await?;
    }
    println!("✓ {} planned jobs, {} completed jobs", job_count, job_count);

    // Availability posts
    let availabilities = db.collection::<CarrierAvailability>(user_id.as_str());
    for (idx, (name, _)) in CARRIERS.iter().enumerate().take(3) {
        let post = CarrierAvailability {
            id: String::new(),
            carrier_id: Some(carrier_ids[idx].clone()),
            carrier_name: name.to_string(),
            phone: format!("53{:08}", 21_234_567 + idx * 1_111),
            current_location: CITIES[idx * 2].to_string(),
            destination_preference: CITIES[idx * 2 + 1].to_string(),
            available_date: today.checked_add_days(Days::new(idx as u64)).unwrap_or(today),
            notes: Some("Dönüş yükü arıyor".to_string()),
            created_at: now,
        };
        availabilities.insert(post).await?;
    }
    println!("✓ 3 availability posts");

    // IBANs
    let ibans = db.collection::<Iban>(user_id.as_str());
    for (idx, (_, contact)) in COMPANIES.iter().enumerate() {
        let iban = Iban {
            id: String::new(),
            name_surname: contact.to_string(),
            iban_number: tr_iban(&format!("00061{:017}", 5_197_864_578_413 + idx as u64)),
            created_at: now,
        };
        ibans.insert(iban).await?;
    }
    println!("✓ {} IBANs", COMPANIES.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds a checksum-valid TC Kimlik number from a 9-digit prefix.
fn national_id(prefix: u64) -> String {
    let mut digits: Vec<u32> = format!("{:09}", prefix)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    let odd: i64 = digits.iter().step_by(2).map(|&d| d as i64).sum();
    let even: i64 = digits[1..8].iter().step_by(2).map(|&d| d as i64).sum();
    digits.push((odd * 7 - even).rem_euclid(10) as u32);

    let total: u32 = digits.iter().sum();
    digits.push(total % 10);

    digits.iter().map(|d| d.to_string()).collect()
}

/// Builds a TR IBAN with correct check digits from a 22-digit BBAN.
fn tr_iban(bban: &str) -> String {
    // BBAN + "TR00" with T=29, R=27
    let remainder = bban
        .chars()
        .chain("292700".chars())
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| (acc * 10 + d) % 97);

    format!("TR{:02}{}", 98 - remainder, bban)
}
