// src/bin/seed.rs
use dotenv::dotenv;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Debug)]
struct SeedResult {
    entity: String,
    name: String,
    success: bool,
    duration_secs: f64,
}

// --- Seeder Logic ---

struct CatalogSeeder {
    base_url: String,
    admin_token: String,
    client: Client,
    results: Vec<SeedResult>,
}

impl CatalogSeeder {
    fn new(base_url: String, admin_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            admin_token,
            client,
            results: Vec::new(),
        }
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("X-Admin-Token", &self.admin_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| format!("Failed to parse response JSON: {}", e))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            Err(format!("HTTP {} - {}", status, body))
        }
    }

    async fn put(&self, path: &str, payload: &Value) -> Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(&url)
            .header("X-Admin-Token", &self.admin_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            response
                .json::<Value>()
                .await
                .map_err(|e| format!("Failed to parse response JSON: {}", e))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            Err(format!("HTTP {} - {}", status, body))
        }
    }

    /// Creates an entity, records the outcome, and returns its id on success.
    async fn create(&mut self, entity: &str, name: &str, path: &str, payload: &Value) -> Option<String> {
        let start_time = Instant::now();
        let outcome = self.post(path, payload).await;
        let duration = start_time.elapsed().as_secs_f64();

        match outcome {
            Ok(body) => {
                println!("{}✅ {} '{}' created ({:.1}s){}", GREEN, entity, name, duration, RESET);
                self.results.push(SeedResult {
                    entity: entity.to_string(),
                    name: name.to_string(),
                    success: true,
                    duration_secs: duration,
                });
                body.get("id").and_then(|v| v.as_str()).map(|s| s.to_string())
            }
            Err(err_msg) => {
                println!("{}❌ Error creating {} '{}': {}{}", RED, entity, name, err_msg, RESET);
                self.results.push(SeedResult {
                    entity: entity.to_string(),
                    name: name.to_string(),
                    success: false,
                    duration_secs: duration,
                });
                None
            }
        }
    }

    async fn publish_package(&mut self, package_id: &str, name: &str) {
        let payload = json!({ "status": "published" });
        match self.put(&format!("/admin/packages/{}", package_id), &payload).await {
            Ok(_) => println!("{}✅ Package '{}' published{}", GREEN, name, RESET),
            Err(err_msg) => println!("{}❌ Error publishing '{}': {}{}", RED, name, err_msg, RESET),
        }
    }

    async fn run(&mut self) {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable.{}", RED, RESET);
            println!("{}Please ensure tembo-travel is running (cargo run){}", YELLOW, RESET);
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        self.print_header();

        // --- Destinations: country -> cities -> places ---
        println!("\n{}🌍 Seeding destinations...{}\n", BOLD, RESET);

        let kenya = self
            .create(
                "destination",
                "Kenya",
                "/admin/destinations",
                &json!({
                    "name": "Kenya",
                    "destination_type": "country",
                    "description": "Home of the great wildebeest migration, white-sand beaches and the Great Rift Valley.",
                    "is_featured": true,
                    "starting_price": 250
                }),
            )
            .await;

        let Some(kenya_id) = kenya else {
            println!("{}❌ Cannot continue without the root destination.{}", RED, RESET);
            self.print_summary();
            return;
        };

        let nairobi = self
            .create(
                "destination",
                "Nairobi",
                "/admin/destinations",
                &json!({
                    "name": "Nairobi",
                    "destination_type": "city",
                    "parent_id": kenya_id.as_str(),
                    "description": "The only capital city in the world with a national park at its doorstep.",
                    "is_featured": true,
                    "starting_price": 180
                }),
            )
            .await;

        let mombasa = self
            .create(
                "destination",
                "Mombasa",
                "/admin/destinations",
                &json!({
                    "name": "Mombasa",
                    "destination_type": "city",
                    "parent_id": kenya_id.as_str(),
                    "description": "Kenya's coastal hub with centuries of Swahili history.",
                    "is_featured": true,
                    "starting_price": 200
                }),
            )
            .await;

        let narok = self
            .create(
                "destination",
                "Narok",
                "/admin/destinations",
                &json!({
                    "name": "Narok",
                    "destination_type": "city",
                    "parent_id": kenya_id.as_str(),
                    "description": "Gateway town to the Maasai Mara."
                }),
            )
            .await;

        let mara = match &narok {
            Some(narok_id) => {
                self.create(
                    "destination",
                    "Maasai Mara",
                    "/admin/destinations",
                    &json!({
                        "name": "Maasai Mara",
                        "destination_type": "place",
                        "parent_id": narok_id,
                        "description": "World-famous game reserve and stage of the great migration.",
                        "is_featured": true,
                        "starting_price": 320
                    }),
                )
                .await
            }
            None => None,
        };

        let diani = match &mombasa {
            Some(mombasa_id) => {
                self.create(
                    "destination",
                    "Diani Beach",
                    "/admin/destinations",
                    &json!({
                        "name": "Diani Beach",
                        "destination_type": "place",
                        "parent_id": mombasa_id,
                        "description": "Seventeen kilometres of white sand south of Mombasa.",
                        "is_featured": true,
                        "starting_price": 150
                    }),
                )
                .await
            }
            None => None,
        };

        // --- Travel modes ---
        println!("\n{}🚆 Seeding travel modes...{}\n", BOLD, RESET);

        let sgr = self
            .create(
                "travel mode",
                "SGR Madaraka Express",
                "/admin/travel-modes",
                &json!({
                    "name": "SGR Madaraka Express",
                    "transport_type": "train",
                    "departure_location": "Nairobi Terminus",
                    "arrival_location": "Mombasa Terminus",
                    "departure_time": "08:00:00",
                    "arrival_time": "14:00:00",
                    "duration_minutes": 360,
                    "price_per_person": 30,
                    "child_discount_percentage": 50
                }),
            )
            .await;

        let flight = self
            .create(
                "travel mode",
                "Nairobi - Mombasa flight",
                "/admin/travel-modes",
                &json!({
                    "name": "Nairobi - Mombasa flight",
                    "transport_type": "flight",
                    "departure_location": "Jomo Kenyatta International Airport",
                    "arrival_location": "Moi International Airport",
                    "departure_time": "07:30:00",
                    "arrival_time": "08:30:00",
                    "duration_minutes": 60,
                    "price_per_person": 110,
                    "child_discount_percentage": 25
                }),
            )
            .await;

        let shuttle = self
            .create(
                "travel mode",
                "Mara safari shuttle",
                "/admin/travel-modes",
                &json!({
                    "name": "Mara safari shuttle",
                    "transport_type": "bus",
                    "departure_location": "Nairobi CBD",
                    "arrival_location": "Sekenani Gate",
                    "departure_time": "06:30:00",
                    "arrival_time": "12:30:00",
                    "duration_minutes": 360,
                    "price_per_person": 45,
                    "child_discount_percentage": 30
                }),
            )
            .await;

        // --- Accommodations ---
        println!("\n{}🏨 Seeding accommodations...{}\n", BOLD, RESET);

        let mara_camp = match &mara {
            Some(mara_id) => {
                self.create(
                    "accommodation",
                    "Acacia Tented Camp",
                    "/admin/accommodations",
                    &json!({
                        "name": "Acacia Tented Camp",
                        "accommodation_type": "lodge",
                        "destination_id": mara_id,
                        "description": "Riverside tented camp five minutes from Sekenani Gate.",
                        "price_per_room_per_night": 140,
                        "max_occupancy_per_room": 3,
                        "total_rooms": 18,
                        "amenities": "restaurant, hot showers, charging points"
                    }),
                )
                .await
            }
            None => None,
        };

        let mara_lodge = match &mara {
            Some(mara_id) => {
                self.create(
                    "accommodation",
                    "Mara Crossing Lodge",
                    "/admin/accommodations",
                    &json!({
                        "name": "Mara Crossing Lodge",
                        "accommodation_type": "lodge",
                        "destination_id": mara_id,
                        "description": "Hilltop lodge overlooking the Mara river crossings.",
                        "price_per_room_per_night": 260,
                        "max_occupancy_per_room": 2,
                        "total_rooms": 30,
                        "amenities": "pool, spa, restaurant, wifi"
                    }),
                )
                .await
            }
            None => None,
        };

        let diani_resort = match &diani {
            Some(diani_id) => {
                self.create(
                    "accommodation",
                    "Baobab Beach Resort",
                    "/admin/accommodations",
                    &json!({
                        "name": "Baobab Beach Resort",
                        "accommodation_type": "resort",
                        "destination_id": diani_id,
                        "description": "All-inclusive beachfront resort on Diani's southern stretch.",
                        "price_per_room_per_night": 190,
                        "max_occupancy_per_room": 4,
                        "total_rooms": 90,
                        "amenities": "pool, beach access, restaurant, wifi, gym"
                    }),
                )
                .await
            }
            None => None,
        };

        if let Some(nairobi_id) = &nairobi {
            self.create(
                "accommodation",
                "Jacaranda City Hotel",
                "/admin/accommodations",
                &json!({
                    "name": "Jacaranda City Hotel",
                    "accommodation_type": "hotel",
                    "destination_id": nairobi_id,
                    "description": "Business hotel in Westlands, twenty minutes from the airport.",
                    "price_per_room_per_night": 85,
                    "max_occupancy_per_room": 2,
                    "total_rooms": 120,
                    "amenities": "restaurant, wifi, conference rooms"
                }),
            )
            .await;
        }

        // --- Packages ---
        println!("\n{}🎒 Seeding packages...{}\n", BOLD, RESET);

        if let Some(mara_id) = &mara {
            let safari = self
                .create(
                    "package",
                    "3-Day Maasai Mara Safari",
                    "/admin/packages",
                    &json!({
                        "name": "3-Day Maasai Mara Safari",
                        "description": "Classic game-drive circuit through the Maasai Mara with two nights under canvas.",
                        "main_destination_id": mara_id,
                        "duration_days": 3,
                        "duration_nights": 2,
                        "adult_price": 450,
                        "child_price": 300,
                        "inclusions": "Park fees, game drives, full board, professional guide",
                        "exclusions": "International flights, tips, drinks",
                        "is_featured": true
                    }),
                )
                .await;

            if let Some(package_id) = safari {
                let itinerary = json!({
                    "title": "Mara game-drive circuit",
                    "overview": "Two full days in the reserve with an optional Maasai village visit.",
                    "days": [
                        {
                            "day_number": 1,
                            "title": "Nairobi to the Mara",
                            "description": "Morning departure through the Great Rift Valley, afternoon game drive.",
                            "destination_id": mara_id,
                            "breakfast": false, "lunch": true, "dinner": true
                        },
                        {
                            "day_number": 2,
                            "title": "Full day in the reserve",
                            "description": "Dawn-to-dusk game drives in search of the big five.",
                            "destination_id": mara_id,
                            "breakfast": true, "lunch": true, "dinner": true
                        },
                        {
                            "day_number": 3,
                            "title": "Return to Nairobi",
                            "description": "Sunrise game drive, then the road back to Nairobi.",
                            "breakfast": true, "lunch": true, "dinner": false
                        }
                    ]
                });
                if let Err(err_msg) = self
                    .put(&format!("/admin/packages/{}/itinerary", package_id), &itinerary)
                    .await
                {
                    println!("{}❌ Error setting itinerary: {}{}", RED, err_msg, RESET);
                }

                let mut accommodation_ids: Vec<String> = Vec::new();
                accommodation_ids.extend(mara_camp.clone());
                accommodation_ids.extend(mara_lodge.clone());
                let mut travel_mode_ids: Vec<String> = Vec::new();
                travel_mode_ids.extend(shuttle.clone());
                let options = json!({
                    "accommodation_ids": accommodation_ids,
                    "travel_mode_ids": travel_mode_ids
                });
                if let Err(err_msg) = self
                    .put(&format!("/admin/packages/{}/options", package_id), &options)
                    .await
                {
                    println!("{}❌ Error setting options: {}{}", RED, err_msg, RESET);
                }

                self.publish_package(&package_id, "3-Day Maasai Mara Safari").await;
            }
        }

        if let Some(diani_id) = &diani {
            let coastal = self
                .create(
                    "package",
                    "5-Day Diani Coastal Escape",
                    "/admin/packages",
                    &json!({
                        "name": "5-Day Diani Coastal Escape",
                        "description": "Beach holiday on Diani's white sand with a day trip to Wasini Island.",
                        "main_destination_id": diani_id,
                        "duration_days": 5,
                        "duration_nights": 4,
                        "adult_price": 380,
                        "child_price": 0,
                        "inclusions": "Accommodation, breakfast, Wasini day trip",
                        "exclusions": "Lunches and dinners, water sports",
                        "is_featured": true
                    }),
                )
                .await;

            if let Some(package_id) = coastal {
                let mut accommodation_ids: Vec<String> = Vec::new();
                accommodation_ids.extend(diani_resort.clone());
                let mut travel_mode_ids: Vec<String> = Vec::new();
                travel_mode_ids.extend(sgr.clone());
                travel_mode_ids.extend(flight.clone());
                let options = json!({
                    "accommodation_ids": accommodation_ids,
                    "travel_mode_ids": travel_mode_ids
                });
                if let Err(err_msg) = self
                    .put(&format!("/admin/packages/{}/options", package_id), &options)
                    .await
                {
                    println!("{}❌ Error setting options: {}{}", RED, err_msg, RESET);
                }

                self.publish_package(&package_id, "5-Day Diani Coastal Escape").await;
            }
        }

        // --- Blog ---
        println!("\n{}📝 Seeding blog content...{}\n", BOLD, RESET);

        let guides = self
            .create(
                "blog category",
                "Travel Guides",
                "/admin/blog/categories",
                &json!({
                    "title": "Travel Guides",
                    "description": "Practical guides for planning your trip."
                }),
            )
            .await;

        if let Some(category_id) = &guides {
            self.create(
                "blog post",
                "When to see the great migration",
                "/admin/blog/posts",
                &json!({
                    "title": "When to see the great migration",
                    "excerpt": "River crossings peak between July and October.",
                    "content": "The wildebeest migration moves clockwise through the Serengeti-Mara ecosystem. For river crossings on the Kenyan side, plan for July through October, with August usually the busiest month at the Mara river...",
                    "category_id": category_id,
                    "tags": ["safari", "maasai mara", "wildlife"],
                    "status": "published"
                }),
            )
            .await;

            self.create(
                "blog post",
                "Riding the Madaraka Express",
                "/admin/blog/posts",
                &json!({
                    "title": "Riding the Madaraka Express",
                    "excerpt": "Everything to know before booking the Nairobi-Mombasa train.",
                    "content": "The standard gauge railway cut the Nairobi-Mombasa journey to under six hours. Book first class early in high season, and sit on the left leaving Nairobi for a chance to spot elephants in Tsavo...",
                    "category_id": category_id,
                    "tags": ["sgr", "mombasa", "practical"],
                    "status": "published"
                }),
            )
            .await;
        }

        self.print_summary();
    }

    fn print_header(&self) {
        println!("{}╔══════════════════════════════════════════════════════════════╗{}", CYAN, RESET);
        println!("{}║   🧳 Catalog Seeder - Tembo Travel (Admin API)               ║{}", CYAN, RESET);
        println!("{}╚══════════════════════════════════════════════════════════════╝{}", CYAN, RESET);
    }

    fn print_summary(&self) {
        println!("\n\n{}📋 Seeding Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────────────────────────");
        println!("{:<18} {:<40} {:<8} {:>10}", "Entity", "Name", "Status", "Duration");
        println!("──────────────────────────────────────────────────────────────────────────────");

        let mut created = 0;
        let mut failed = 0;
        let mut total_duration = 0.0;

        for res in &self.results {
            let status_icon = if res.success { "✅" } else { "❌" };
            println!(
                "{:<18} {:<40} {:<8} {:>9.1}s",
                res.entity, res.name, status_icon, res.duration_secs
            );
            if res.success {
                created += 1;
            } else {
                failed += 1;
            }
            total_duration += res.duration_secs;
        }

        println!("──────────────────────────────────────────────────────────────────────────────");
        if failed == 0 {
            println!("\n{}✨ Process Completed Successfully{}", GREEN, RESET);
        } else {
            println!("\n{}⚠️  Completed with {} failures{}", YELLOW, failed, RESET);
        }
        println!("{}📊 Totals:{}", BOLD, RESET);
        println!("  • Entities created: {}{}{}", GREEN, created, RESET);
        println!("  • Failures: {}{}{}", RED, failed, RESET);
        println!("  • Total Duration: {:.1}s", total_duration);
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let admin_token = env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set in .env");
    let base_url = env::var("TRAVEL_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

    let mut seeder = CatalogSeeder::new(base_url, admin_token);
    seeder.run().await;
}
