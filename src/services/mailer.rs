// src/services/mailer.rs
// DOCUMENTATION: Transactional email client and message builders
// PURPOSE: Best-effort outbound mail; failures are logged, never surfaced

use crate::db::{BookingRepository, NewsletterRepository, QuoteRepository};
use crate::errors::TravelError;
use crate::models::{Booking, QuoteRequest};
use reqwest::Client;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

/// Payload posted to the email API's /send endpoint
#[derive(Debug, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// HTTP transactional-email API client
/// With no token configured, sends are logged and skipped (dev mode)
pub struct EmailClient {
    client: Client,
    api_url: String,
    api_token: String,
    from: String,
    pub admin_email: String,
    pub site_url: String,
    pub whatsapp_number: String,
}

impl EmailClient {
    pub fn new(
        api_url: String,
        api_token: String,
        from: String,
        admin_email: String,
        site_url: String,
        whatsapp_number: String,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
            from,
            admin_email,
            site_url,
            whatsapp_number,
        }
    }

    /// Deep link for contacting the agency about a booking
    pub fn whatsapp_link(&self, reference: &str) -> String {
        let number: String = self
            .whatsapp_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        format!(
            "https://wa.me/{}?text=Hello,%20I%20have%20a%20question%20about%20booking%20{}",
            number, reference
        )
    }

    /// Post one message to the email API
    pub async fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<(), TravelError> {
        if self.api_token.is_empty() {
            log::info!("Email API token not configured; skipping send to {} ({})", to, subject);
            return Ok(());
        }

        let url = format!("{}/send", self.api_url);
        let message = EmailMessage {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
            html: html.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                log::error!("Email API request failed: {}", e);
                TravelError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Email API error {}: {}", status, body);
            return Err(TravelError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        log::info!("Email sent to {}: {}", to, subject);
        Ok(())
    }
}

/// Subject, text and html for a booking confirmation
pub fn booking_confirmation_message(
    booking: &Booking,
    package_name: &str,
    whatsapp_link: &str,
    site_url: &str,
) -> (String, String, String) {
    let subject = format!("Booking confirmed - {}", booking.booking_reference);
    let text = format!(
        "Dear {},\n\n\
         Thank you for booking {} with Tembo Travel.\n\n\
         Booking reference: {}\n\
         Travelers: {} adults, {} children\n\
         Package price: ${}\n\
         Accommodation: ${}\n\
         Travel: ${}\n\
         Total: ${}\n\n\
         Questions? Reach us on WhatsApp: {}\n\
         Manage your trip at {}/account\n",
        booking.full_name,
        package_name,
        booking.booking_reference,
        booking.number_of_adults,
        booking.number_of_children,
        booking.package_price,
        booking.accommodation_price,
        booking.travel_price,
        booking.total_amount,
        whatsapp_link,
        site_url,
    );
    let html = format!(
        "<h2>Booking confirmed</h2>\
         <p>Dear {},</p>\
         <p>Thank you for booking <strong>{}</strong> with Tembo Travel.</p>\
         <p>Your booking reference is <strong>{}</strong>.</p>\
         <table>\
         <tr><td>Package price</td><td>${}</td></tr>\
         <tr><td>Accommodation</td><td>${}</td></tr>\
         <tr><td>Travel</td><td>${}</td></tr>\
         <tr><td><strong>Total</strong></td><td><strong>${}</strong></td></tr>\
         </table>\
         <p><a href=\"{}\">Chat with us on WhatsApp</a> or visit \
         <a href=\"{}/account\">your account</a>.</p>",
        booking.full_name,
        package_name,
        booking.booking_reference,
        booking.package_price,
        booking.accommodation_price,
        booking.travel_price,
        booking.total_amount,
        whatsapp_link,
        site_url,
    );
    (subject, text, html)
}

/// Subject, text and html for the admin new-booking notice
pub fn admin_booking_message(booking: &Booking, package_name: &str) -> (String, String, String) {
    let subject = format!(
        "New booking {} - {}",
        booking.booking_reference, package_name
    );
    let text = format!(
        "New booking received.\n\n\
         Reference: {}\n\
         Package: {}\n\
         Customer: {} <{}> ({})\n\
         Travelers: {} adults, {} children, {} rooms\n\
         Total: ${}\n\
         Special requests: {}\n",
        booking.booking_reference,
        package_name,
        booking.full_name,
        booking.email,
        booking.phone_number,
        booking.number_of_adults,
        booking.number_of_children,
        booking.number_of_rooms,
        booking.total_amount,
        booking.special_requests.as_deref().unwrap_or("none"),
    );
    let html = format!(
        "<h2>New booking {}</h2>\
         <p><strong>{}</strong></p>\
         <p>{} &lt;{}&gt; ({})</p>\
         <p>{} adults, {} children, {} rooms - total ${}</p>\
         <p>Special requests: {}</p>",
        booking.booking_reference,
        package_name,
        booking.full_name,
        booking.email,
        booking.phone_number,
        booking.number_of_adults,
        booking.number_of_children,
        booking.number_of_rooms,
        booking.total_amount,
        booking.special_requests.as_deref().unwrap_or("none"),
    );
    (subject, text, html)
}

/// Welcome mail for accounts created during guest checkout
pub fn welcome_message(
    full_name: &str,
    username: &str,
    password: &str,
    site_url: &str,
) -> (String, String, String) {
    let subject = "Welcome to Tembo Travel".to_string();
    let text = format!(
        "Dear {},\n\n\
         An account was created for you so you can track your bookings.\n\n\
         Username: {}\n\
         Password: {}\n\n\
         Log in at {}/login and change your password.\n",
        full_name, username, password, site_url,
    );
    let html = format!(
        "<h2>Welcome to Tembo Travel</h2>\
         <p>Dear {},</p>\
         <p>An account was created for you so you can track your bookings.</p>\
         <p>Username: <strong>{}</strong><br>Password: <strong>{}</strong></p>\
         <p><a href=\"{}/login\">Log in</a> and change your password.</p>",
        full_name, username, password, site_url,
    );
    (subject, text, html)
}

/// Status-change notice sent when an admin confirms a booking
pub fn booking_status_message(booking: &Booking, status: &str) -> (String, String, String) {
    let subject = format!(
        "Booking {} is now {}",
        booking.booking_reference, status
    );
    let text = format!(
        "Dear {},\n\nYour booking {} has been {}.\n\nTotal: ${}\n",
        booking.full_name, booking.booking_reference, status, booking.total_amount,
    );
    let html = format!(
        "<p>Dear {},</p><p>Your booking <strong>{}</strong> has been <strong>{}</strong>.</p>\
         <p>Total: ${}</p>",
        booking.full_name, booking.booking_reference, status, booking.total_amount,
    );
    (subject, text, html)
}

/// Acknowledgement sent to the customer who asked for a quote
pub fn quote_received_message(quote: &QuoteRequest) -> (String, String, String) {
    let subject = "Quote request received - Tembo Travel".to_string();
    let destination = quote.destination.as_deref().unwrap_or("your trip");
    let text = format!(
        "Dear {},\n\n\
         Thank you for your quote request for {}.\n\
         Travelers: {}\n\
         Preferred dates: {}\n\n\
         Our team will contact you within 24 hours with a personalized quote.\n",
        quote.full_name,
        destination,
        quote.number_of_travelers,
        quote.preferred_travel_dates.as_deref().unwrap_or("flexible"),
    );
    let html = format!(
        "<h2>Quote request received</h2>\
         <p>Dear {},</p>\
         <p>Thank you for your quote request for <strong>{}</strong>.</p>\
         <p>Travelers: {}<br>Preferred dates: {}</p>\
         <p>Our team will contact you within 24 hours with a personalized quote.</p>",
        quote.full_name,
        destination,
        quote.number_of_travelers,
        quote.preferred_travel_dates.as_deref().unwrap_or("flexible"),
    );
    (subject, text, html)
}

/// Admin notice for a new quote request
pub fn admin_quote_message(quote: &QuoteRequest) -> (String, String, String) {
    let subject = format!("New quote request from {}", quote.full_name);
    let text = format!(
        "New quote request received.\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Destination: {}\n\
         Preferred dates: {}\n\
         Travelers: {}\n\
         Special requests: {}\n",
        quote.full_name,
        quote.email,
        quote.phone_number.as_deref().unwrap_or("not provided"),
        quote.destination.as_deref().unwrap_or("not specified"),
        quote.preferred_travel_dates.as_deref().unwrap_or("flexible"),
        quote.number_of_travelers,
        quote.special_requests.as_deref().unwrap_or("none"),
    );
    let html = format!(
        "<h2>New quote request</h2>\
         <p><strong>{}</strong> &lt;{}&gt; ({})</p>\
         <p>Destination: {}<br>Preferred dates: {}<br>Travelers: {}</p>\
         <p>Special requests: {}</p>",
        quote.full_name,
        quote.email,
        quote.phone_number.as_deref().unwrap_or("not provided"),
        quote.destination.as_deref().unwrap_or("not specified"),
        quote.preferred_travel_dates.as_deref().unwrap_or("flexible"),
        quote.number_of_travelers,
        quote.special_requests.as_deref().unwrap_or("none"),
    );
    (subject, text, html)
}

/// Newsletter welcome carrying the confirm/unsubscribe links
pub fn newsletter_welcome_message(token: &str, site_url: &str) -> (String, String, String) {
    let subject = "Welcome to the Tembo Travel newsletter".to_string();
    let confirm = format!("{}/newsletter/confirm/{}", site_url, token);
    let unsubscribe = format!("{}/newsletter/unsubscribe/{}", site_url, token);
    let text = format!(
        "Thanks for subscribing!\n\n\
         Confirm your subscription: {}\n\
         Unsubscribe at any time: {}\n",
        confirm, unsubscribe,
    );
    let html = format!(
        "<h2>Thanks for subscribing!</h2>\
         <p><a href=\"{}\">Confirm your subscription</a></p>\
         <p><a href=\"{}\">Unsubscribe</a> at any time.</p>",
        confirm, unsubscribe,
    );
    (subject, text, html)
}

/// Fire-and-forget booking emails, persisting sent flags on success
pub fn spawn_booking_emails(
    client: Arc<EmailClient>,
    pool: PgPool,
    booking: Booking,
    package_name: String,
) {
    let whatsapp = client.whatsapp_link(&booking.booking_reference);

    {
        let client = client.clone();
        let pool = pool.clone();
        let booking = booking.clone();
        let package_name = package_name.clone();
        tokio::spawn(async move {
            let (subject, text, html) =
                booking_confirmation_message(&booking, &package_name, &whatsapp, &client.site_url);
            match client.send(&booking.email, &subject, &text, &html).await {
                Ok(()) => {
                    if let Err(e) =
                        BookingRepository::mark_confirmation_email_sent(&pool, booking.id).await
                    {
                        log::warn!("Could not persist confirmation email flag: {}", e);
                    }
                }
                Err(e) => log::warn!(
                    "Confirmation email for {} failed: {}",
                    booking.booking_reference,
                    e
                ),
            }
        });
    }

    tokio::spawn(async move {
        let (subject, text, html) = admin_booking_message(&booking, &package_name);
        match client
            .send(&client.admin_email, &subject, &text, &html)
            .await
        {
            Ok(()) => {
                if let Err(e) =
                    BookingRepository::mark_admin_notification_sent(&pool, booking.id).await
                {
                    log::warn!("Could not persist admin notification flag: {}", e);
                }
            }
            Err(e) => log::warn!(
                "Admin notification for {} failed: {}",
                booking.booking_reference,
                e
            ),
        }
    });
}

/// Fire-and-forget welcome email for a guest-created account
pub fn spawn_welcome_email(
    client: Arc<EmailClient>,
    email: String,
    full_name: String,
    username: String,
    password: String,
) {
    tokio::spawn(async move {
        let (subject, text, html) =
            welcome_message(&full_name, &username, &password, &client.site_url);
        if let Err(e) = client.send(&email, &subject, &text, &html).await {
            log::warn!("Welcome email to {} failed: {}", email, e);
        }
    });
}

/// Fire-and-forget status-change email
pub fn spawn_status_email(client: Arc<EmailClient>, booking: Booking, status: String) {
    tokio::spawn(async move {
        let (subject, text, html) = booking_status_message(&booking, &status);
        if let Err(e) = client.send(&booking.email, &subject, &text, &html).await {
            log::warn!(
                "Status email for {} failed: {}",
                booking.booking_reference,
                e
            );
        }
    });
}

/// Fire-and-forget quote acknowledgement + admin notice, persisting sent flags
pub fn spawn_quote_emails(client: Arc<EmailClient>, pool: PgPool, quote: QuoteRequest) {
    {
        let client = client.clone();
        let pool = pool.clone();
        let quote = quote.clone();
        tokio::spawn(async move {
            let (subject, text, html) = quote_received_message(&quote);
            match client.send(&quote.email, &subject, &text, &html).await {
                Ok(()) => {
                    if let Err(e) =
                        QuoteRepository::mark_confirmation_email_sent(&pool, quote.id).await
                    {
                        log::warn!("Could not persist quote acknowledgement flag: {}", e);
                    }
                }
                Err(e) => log::warn!("Quote acknowledgement for {} failed: {}", quote.email, e),
            }
        });
    }

    tokio::spawn(async move {
        let (subject, text, html) = admin_quote_message(&quote);
        match client
            .send(&client.admin_email, &subject, &text, &html)
            .await
        {
            Ok(()) => {
                if let Err(e) = QuoteRepository::mark_admin_notification_sent(&pool, quote.id).await
                {
                    log::warn!("Could not persist quote notice flag: {}", e);
                }
            }
            Err(e) => log::warn!("Quote notice for {} failed: {}", quote.id, e),
        }
    });
}

/// Fire-and-forget newsletter welcome + admin notice
pub fn spawn_newsletter_emails(client: Arc<EmailClient>, pool: PgPool, email: String, token: String) {
    {
        let client = client.clone();
        let pool = pool.clone();
        let email = email.clone();
        tokio::spawn(async move {
            let (subject, text, html) = newsletter_welcome_message(&token, &client.site_url);
            match client.send(&email, &subject, &text, &html).await {
                Ok(()) => {
                    if let Err(e) =
                        NewsletterRepository::mark_confirmation_email_sent(&pool, &email).await
                    {
                        log::warn!("Could not persist newsletter email flag: {}", e);
                    }
                }
                Err(e) => log::warn!("Newsletter welcome to {} failed: {}", email, e),
            }
        });
    }

    tokio::spawn(async move {
        let subject = "New newsletter subscriber".to_string();
        let text = format!("New subscriber: {}\n", email);
        let html = format!("<p>New subscriber: <strong>{}</strong></p>", email);
        match client
            .send(&client.admin_email, &subject, &text, &html)
            .await
        {
            Ok(()) => {
                if let Err(e) =
                    NewsletterRepository::mark_admin_notification_sent(&pool, &email).await
                {
                    log::warn!("Could not persist admin notice flag: {}", e);
                }
            }
            Err(e) => log::warn!("Subscriber notice for {} failed: {}", email, e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EmailClient {
        EmailClient::new(
            "https://mail.example.com/api".to_string(),
            String::new(),
            "bookings@tembotravel.example".to_string(),
            "admin@tembotravel.example".to_string(),
            "https://tembotravel.example".to_string(),
            "+254 700 000-000".to_string(),
        )
    }

    #[test]
    fn test_whatsapp_link_strips_formatting() {
        let link = client().whatsapp_link("TRV1234567");
        assert!(link.starts_with("https://wa.me/254700000000?"));
        assert!(link.contains("TRV1234567"));
    }

    #[tokio::test]
    async fn test_send_without_token_is_noop() {
        let result = client()
            .send("someone@example.com", "Hi", "text", "<p>html</p>")
            .await;
        assert!(result.is_ok());
    }

    fn quote() -> QuoteRequest {
        QuoteRequest {
            id: uuid::Uuid::new_v4(),
            full_name: "Jane Traveler".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            destination: Some("Maasai Mara".to_string()),
            preferred_travel_dates: Some("December 2026".to_string()),
            number_of_travelers: 4,
            special_requests: None,
            package_id: None,
            confirmation_email_sent: false,
            admin_notification_sent: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_quote_received_message_mentions_trip() {
        let (subject, text, html) = quote_received_message(&quote());
        assert!(subject.contains("Quote request received"));
        assert!(text.contains("Maasai Mara"));
        assert!(html.contains("December 2026"));
    }

    #[test]
    fn test_admin_quote_message_defaults_missing_fields() {
        let (subject, text, _) = admin_quote_message(&quote());
        assert!(subject.contains("Jane Traveler"));
        assert!(text.contains("Phone: not provided"));
        assert!(text.contains("Special requests: none"));
    }

    #[test]
    fn test_newsletter_message_contains_links() {
        let (_, text, html) =
            newsletter_welcome_message("abc123", "https://tembotravel.example");
        assert!(text.contains("/newsletter/confirm/abc123"));
        assert!(html.contains("/newsletter/unsubscribe/abc123"));
    }
}
