use chrono::{Days, NaiveDate};
use thiserror::Error;
use url::form_urlencoded;
use uuid::Uuid;

use crate::db::store::{ReservationStore, StoreError};
use crate::models::booking::{
    BookingDraft, BookingStep, ContactInfo, MAX_GUESTS, MAX_ROOMS, MIN_GUESTS, MIN_ROOMS,
};
use crate::models::hotel::Hotel;
use crate::models::promotion::Promotion;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::services::pricing_service::{PriceBreakdown, PricingError, PricingService};
use crate::services::promotion_service::{PromotionError, PromotionService};
use crate::services::session::SessionProvider;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select a room type to continue")]
    MissingRoomType,
    #[error("please fill in first name, last name and email")]
    MissingContactField,
    #[error("{0} is not offered by this hotel")]
    UnknownRoomType(String),
    #[error("guests must be between 1 and 8 (got {0})")]
    InvalidGuestCount(u32),
    #[error("rooms must be between 1 and 5 (got {0})")]
    InvalidRoomCount(u32),
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Promotion(#[from] PromotionError),
    #[error("could not save reservation: {0}")]
    Store(#[from] StoreError),
    #[error("check-in {check_in} is before {earliest}")]
    CheckInInPast {
        check_in: NaiveDate,
        earliest: NaiveDate,
    },
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    #[error("stay details can only change on the first step")]
    WrongStep(BookingStep),
    #[error("sign in to continue booking")]
    NotAuthenticated { return_to: String },
    #[error("this booking is already completed")]
    AlreadyCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Advanced(BookingStep),
    BookingCompleted { reservation_id: String },
}

/// Two-step booking wizard for one hotel.
///
/// Stay details are collected first, then guest information. Completing the
/// second step builds a pending [`Reservation`] and hands it to the store.
/// Every guard failure leaves the draft exactly as it was.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    hotel: Hotel,
    draft: BookingDraft,
    eligible_promotions: Vec<Promotion>,
    applied_promotion: Option<Promotion>,
    reservation_id: Option<String>,
}

impl BookingFlow {
    pub fn new(hotel: Hotel, today: NaiveDate, preselected_room: Option<&str>) -> Self {
        let preselected_room = preselected_room.filter(|room| hotel.offers_room(room));
        let draft = BookingDraft::new(&hotel.id, today, preselected_room);

        Self {
            hotel,
            draft,
            eligible_promotions: Vec::new(),
            applied_promotion: None,
            reservation_id: None,
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn step(&self) -> BookingStep {
        self.draft.step
    }

    pub fn eligible_promotions(&self) -> &[Promotion] {
        &self.eligible_promotions
    }

    pub fn applied_promotion(&self) -> Option<&Promotion> {
        self.applied_promotion.as_ref()
    }

    pub fn reservation_id(&self) -> Option<&str> {
        self.reservation_id.as_deref()
    }

    pub fn discount_percent(&self) -> f64 {
        self.applied_promotion
            .as_ref()
            .map(|promo| promo.discount_percent)
            .unwrap_or(0.0)
    }

    pub fn nights(&self) -> i64 {
        PricingService::nights_between(self.draft.check_in, self.draft.check_out)
    }

    /// Where the sign-in page should send the user back to
    pub fn return_path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("hotelId", &self.hotel.id);
        if !self.draft.selected_room_type.is_empty() {
            query.append_pair("room", &self.draft.selected_room_type);
        }
        format!("/booking?{}", query.finish())
    }

    /// Keep the promotions that apply here and switch to the best one
    pub fn load_promotions(&mut self, all: &[Promotion]) {
        self.eligible_promotions = PromotionService::eligible_promotions(all, &self.hotel.id);
        self.applied_promotion = PromotionService::best_discount(&self.eligible_promotions).cloned();
        self.draft.applied_promotion_id = self.applied_promotion.as_ref().map(|p| p.id.clone());

        if let Some(promo) = &self.applied_promotion {
            log::debug!(
                "Auto-applied promotion {} ({}% off) to hotel {}",
                promo.id,
                promo.discount_percent,
                self.hotel.id
            );
        }
    }

    /// A matching code always replaces the applied promotion, even for a smaller discount.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<&Promotion, BookingError> {
        self.ensure_open()?;

        let promo = PromotionService::apply_code(&self.eligible_promotions, code)?.clone();
        self.draft.applied_promotion_id = Some(promo.id.clone());
        let applied = self.applied_promotion.insert(promo);
        Ok(&*applied)
    }

    pub fn quote(&self) -> Result<PriceBreakdown, PricingError> {
        PricingService::quote_stay(
            self.hotel.price,
            &self.draft.selected_room_type,
            self.discount_percent(),
            self.draft.check_in,
            self.draft.check_out,
            self.draft.rooms,
        )
    }

    /// Moving check-in onto or past check-out pushes check-out to the next day.
    pub fn set_check_in(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.ensure_stay_step()?;
        if date < self.draft.opened_on {
            return Err(BookingError::CheckInInPast {
                check_in: date,
                earliest: self.draft.opened_on,
            });
        }

        let next_day = date
            .checked_add_days(Days::new(1))
            .ok_or(BookingError::InvalidDateRange {
                check_in: date,
                check_out: date,
            })?;

        self.draft.check_in = date;
        if self.draft.check_out <= date {
            self.draft.check_out = next_day;
        }
        Ok(())
    }

    pub fn set_check_out(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.ensure_stay_step()?;
        if date <= self.draft.check_in {
            return Err(BookingError::InvalidDateRange {
                check_in: self.draft.check_in,
                check_out: date,
            });
        }
        self.draft.check_out = date;
        Ok(())
    }

    pub fn set_guests(&mut self, guests: u32) -> Result<(), BookingError> {
        self.ensure_stay_step()?;
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
            return Err(ValidationError::InvalidGuestCount(guests).into());
        }
        self.draft.guests = guests;
        Ok(())
    }

    pub fn set_rooms(&mut self, rooms: u32) -> Result<(), BookingError> {
        self.ensure_stay_step()?;
        if !(MIN_ROOMS..=MAX_ROOMS).contains(&rooms) {
            return Err(ValidationError::InvalidRoomCount(rooms).into());
        }
        self.draft.rooms = rooms;
        Ok(())
    }

    /// An empty label clears the selection.
    pub fn select_room_type(&mut self, room_type: &str) -> Result<(), BookingError> {
        self.ensure_stay_step()?;
        if !room_type.is_empty() && !self.hotel.offers_room(room_type) {
            return Err(ValidationError::UnknownRoomType(room_type.to_string()).into());
        }
        self.draft.selected_room_type = room_type.to_string();
        Ok(())
    }

    pub fn update_contact(&mut self, contact: ContactInfo) -> Result<(), BookingError> {
        self.ensure_open()?;
        self.draft.contact = contact;
        Ok(())
    }

    pub fn back(&mut self) -> Result<BookingStep, BookingError> {
        self.ensure_open()?;
        self.draft.step = BookingStep::CollectingStayDetails;
        Ok(self.draft.step)
    }

    /// Advance the wizard. The last step persists the reservation; if the
    /// store fails the flow stays on the guest step so the user can retry.
    pub async fn continue_step<S>(
        &mut self,
        session: &dyn SessionProvider,
        store: &S,
    ) -> Result<FlowOutcome, BookingError>
    where
        S: ReservationStore + ?Sized,
    {
        self.ensure_open()?;
        if !session.current_session().is_authenticated {
            return Err(BookingError::NotAuthenticated {
                return_to: self.return_path(),
            });
        }

        match self.draft.step {
            BookingStep::CollectingStayDetails => {
                if self.draft.selected_room_type.is_empty() {
                    return Err(ValidationError::MissingRoomType.into());
                }
                self.draft.step = BookingStep::CollectingGuestInfo;
                Ok(FlowOutcome::Advanced(self.draft.step))
            }
            BookingStep::CollectingGuestInfo => {
                if !self.draft.contact.has_required_fields() {
                    return Err(ValidationError::MissingContactField.into());
                }

                let reservation = self.build_reservation(session)?;
                let reservation_id = reservation.id.clone();

                if let Err(err) = store.create(reservation).await {
                    log::error!("Failed to save reservation {}: {}", reservation_id, err);
                    return Err(err.into());
                }

                log::info!(
                    "Reservation {} created for hotel {}",
                    reservation_id,
                    self.hotel.id
                );
                self.draft.step = BookingStep::Completed;
                self.reservation_id = Some(reservation_id.clone());
                Ok(FlowOutcome::BookingCompleted { reservation_id })
            }
            BookingStep::Completed => Err(BookingError::AlreadyCompleted),
        }
    }

    fn build_reservation(&self, session: &dyn SessionProvider) -> Result<Reservation, BookingError> {
        let price = self.quote()?;
        let user = session.current_session().user;
        let contact = &self.draft.contact;

        let (guest_name, email) = match &user {
            Some(user) => (user.name.clone(), user.email.clone()),
            None => (contact.full_name(), contact.email.clone()),
        };

        Ok(Reservation {
            id: Uuid::new_v4().to_string(),
            hotel_id: self.hotel.id.clone(),
            hotel_name: self.hotel.name.clone(),
            guest_name,
            email,
            phone: contact.phone.clone(),
            check_in: self.draft.check_in.format("%Y-%m-%d").to_string(),
            check_out: self.draft.check_out.format("%Y-%m-%d").to_string(),
            guests: self.draft.guests,
            rooms: self.draft.rooms,
            room_type: self.draft.selected_room_type.clone(),
            status: ReservationStatus::Pending,
            total_amount: price.total,
            special_requests: contact.special_requests.clone(),
            user_id: user.map(|u| u.email),
        })
    }

    fn ensure_open(&self) -> Result<(), BookingError> {
        if self.draft.step == BookingStep::Completed {
            return Err(BookingError::AlreadyCompleted);
        }
        Ok(())
    }

    fn ensure_stay_step(&self) -> Result<(), BookingError> {
        self.ensure_open()?;
        if self.draft.step != BookingStep::CollectingStayDetails {
            return Err(BookingError::WrongStep(self.draft.step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::broadcast;

    use crate::db::memory::MemoryStore;
    use crate::db::store::StoreEvent;
    use crate::models::promotion::PromotionStatus;
    use crate::models::user::{Session, SessionUser, UserRole};

    struct FullDisk;

    #[async_trait]
    impl ReservationStore for FullDisk {
        async fn list(&self) -> Result<Vec<Reservation>, StoreError> {
            Ok(vec![])
        }

        async fn create(&self, _reservation: Reservation) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }

        async fn update_status(&self, id: &str, _: ReservationStatus) -> Result<(), StoreError> {
            Err(StoreError::reservation_not_found(id))
        }

        async fn delete(&self, id: &str) -> Result<(), StoreError> {
            Err(StoreError::reservation_not_found(id))
        }

        fn subscribe(&self) -> Option<broadcast::Receiver<StoreEvent>> {
            None
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_hotel() -> Hotel {
        Hotel {
            id: "h1".to_string(),
            name: "Harbor House".to_string(),
            location: "Portland, Maine".to_string(),
            price: 200.0,
            rating: 4.4,
            description: String::new(),
            tags: vec![],
            amenities: vec![],
            rooms: vec!["Standard Room".to_string(), "Deluxe Ocean View".to_string()],
        }
    }

    fn promo(id: &str, percent: f64, code: &str) -> Promotion {
        Promotion {
            id: id.to_string(),
            name: format!("Promo {}", id),
            description: String::new(),
            discount_percent: percent,
            start_date: None,
            end_date: None,
            hotel_ids: vec![],
            code: code.to_string(),
            status: PromotionStatus::Active,
        }
    }

    fn guest() -> Session {
        Session::signed_in(SessionUser {
            name: "alex".to_string(),
            email: "alex@example.com".to_string(),
            role: UserRole::User,
        })
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            first_name: "Alex".to_string(),
            last_name: "Rivera".to_string(),
            email: "alex.rivera@example.com".to_string(),
            phone: "555-0100".to_string(),
            special_requests: "Late arrival".to_string(),
        }
    }

    fn flow() -> BookingFlow {
        BookingFlow::new(test_hotel(), date(2024, 1, 1), None)
    }

    #[test]
    fn test_initial_draft() {
        let flow = BookingFlow::new(test_hotel(), date(2024, 1, 1), Some("Deluxe Ocean View"));
        let draft = flow.draft();
        assert_eq!(draft.check_in, date(2024, 1, 1));
        assert_eq!(draft.check_out, date(2024, 1, 2));
        assert_eq!(draft.guests, 2);
        assert_eq!(draft.rooms, 1);
        assert_eq!(draft.selected_room_type, "Deluxe Ocean View");
        assert_eq!(flow.step(), BookingStep::CollectingStayDetails);

        let flow = BookingFlow::new(test_hotel(), date(2024, 1, 1), Some("Igloo"));
        assert_eq!(flow.draft().selected_room_type, "");
    }

    #[tokio::test]
    async fn test_continue_without_room_type_is_rejected() {
        let store = MemoryStore::new();
        let mut flow = flow();

        let err = flow.continue_step(&guest(), &store).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(ValidationError::MissingRoomType)));
        assert_eq!(flow.step(), BookingStep::CollectingStayDetails);
    }

    #[tokio::test]
    async fn test_continue_requires_contact_fields() {
        let store = MemoryStore::new();
        let mut flow = flow();
        flow.select_room_type("Standard Room").unwrap();
        flow.continue_step(&guest(), &store).await.unwrap();

        let mut partial = contact();
        partial.last_name.clear();
        flow.update_contact(partial).unwrap();

        let err = flow.continue_step(&guest(), &store).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Validation(ValidationError::MissingContactField)
        ));
        assert_eq!(flow.step(), BookingStep::CollectingGuestInfo);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_session_cannot_proceed() {
        let store = MemoryStore::new();
        let mut flow = flow();
        flow.select_room_type("Standard Room").unwrap();

        match flow.continue_step(&Session::anonymous(), &store).await {
            Err(BookingError::NotAuthenticated { return_to }) => {
                assert_eq!(return_to, "/booking?hotelId=h1&room=Standard+Room");
            }
            other => panic!("expected NotAuthenticated, got {:?}", other),
        }
        assert_eq!(flow.step(), BookingStep::CollectingStayDetails);
    }

    #[tokio::test]
    async fn test_full_booking_creates_pending_reservation() {
        let store = MemoryStore::new();
        let mut flow = flow();
        flow.load_promotions(&[promo("p20", 20.0, "SAVE20")]);
        flow.set_check_out(date(2024, 1, 4)).unwrap();
        flow.set_rooms(2).unwrap();
        flow.select_room_type("Deluxe Ocean View").unwrap();

        assert_eq!(
            flow.continue_step(&guest(), &store).await.unwrap(),
            FlowOutcome::Advanced(BookingStep::CollectingGuestInfo)
        );
        flow.update_contact(contact()).unwrap();

        let reservation_id = match flow.continue_step(&guest(), &store).await.unwrap() {
            FlowOutcome::BookingCompleted { reservation_id } => reservation_id,
            other => panic!("unexpected outcome {:?}", other),
        };

        let saved = store.get(&reservation_id).await.unwrap().unwrap();
        assert_eq!(saved.status, ReservationStatus::Pending);
        assert_eq!(saved.check_in, "2024-01-01");
        assert_eq!(saved.check_out, "2024-01-04");
        assert_eq!(saved.rooms, 2);
        assert_eq!(saved.room_type, "Deluxe Ocean View");
        assert!((saved.total_amount - 1656.0).abs() < 1e-9);
        // Signed-in user wins over the typed contact name
        assert_eq!(saved.guest_name, "alex");
        assert_eq!(saved.email, "alex@example.com");
        assert_eq!(saved.user_id.as_deref(), Some("alex@example.com"));
        assert_eq!(saved.phone, "555-0100");
        assert_eq!(saved.special_requests, "Late arrival");

        assert_eq!(flow.step(), BookingStep::Completed);
        assert_eq!(flow.reservation_id(), Some(reservation_id.as_str()));
        assert!(matches!(
            flow.continue_step(&guest(), &store).await,
            Err(BookingError::AlreadyCompleted)
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_saved_total_is_not_rounded() {
        let hotel = Hotel {
            id: "5".to_string(),
            price: 199.0,
            rooms: vec!["Garden Suite".to_string()],
            ..test_hotel()
        };
        let store = MemoryStore::new();
        let mut flow = BookingFlow::new(hotel, date(2024, 1, 1), Some("Garden Suite"));
        flow.load_promotions(&[promo("p7", 7.5, "SEVEN")]);

        let quote = flow.quote().unwrap();
        assert!((quote.total - 359.866625).abs() < 1e-9);

        flow.continue_step(&guest(), &store).await.unwrap();
        flow.update_contact(contact()).unwrap();
        let reservation_id = match flow.continue_step(&guest(), &store).await.unwrap() {
            FlowOutcome::BookingCompleted { reservation_id } => reservation_id,
            other => panic!("unexpected outcome {:?}", other),
        };

        let saved = store.get(&reservation_id).await.unwrap().unwrap();
        assert_eq!(saved.total_amount, quote.subtotal + quote.taxes);
        assert_eq!(saved.total_amount, quote.total);
    }

    #[test]
    fn test_return_path_encodes_room_label() {
        let mut flow = flow();
        flow.select_room_type("Deluxe Ocean View").unwrap();
        assert_eq!(flow.return_path(), "/booking?hotelId=h1&room=Deluxe+Ocean+View");
    }

    #[tokio::test]
    async fn test_store_failure_keeps_draft() {
        let mut flow = flow();
        flow.select_room_type("Standard Room").unwrap();
        flow.continue_step(&guest(), &FullDisk).await.unwrap();
        flow.update_contact(contact()).unwrap();

        let err = flow.continue_step(&guest(), &FullDisk).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(StoreError::Io(_))));
        assert_eq!(flow.step(), BookingStep::CollectingGuestInfo);
        assert_eq!(flow.draft().contact, contact());
        assert!(flow.reservation_id().is_none());

        // Retrying against a working store succeeds with the same draft
        let store = MemoryStore::new();
        assert!(matches!(
            flow.continue_step(&guest(), &store).await,
            Ok(FlowOutcome::BookingCompleted { .. })
        ));
    }

    #[test]
    fn test_check_in_pushes_check_out() {
        let mut flow = flow();
        flow.set_check_in(date(2024, 1, 5)).unwrap();
        assert_eq!(flow.draft().check_out, date(2024, 1, 6));

        flow.set_check_out(date(2024, 1, 10)).unwrap();
        flow.set_check_in(date(2024, 1, 7)).unwrap();
        assert_eq!(flow.draft().check_out, date(2024, 1, 10));
        assert_eq!(flow.nights(), 3);
    }

    #[test]
    fn test_date_guards() {
        let mut flow = flow();
        assert!(matches!(
            flow.set_check_in(date(2023, 12, 31)),
            Err(BookingError::CheckInInPast { .. })
        ));
        assert!(matches!(
            flow.set_check_out(date(2024, 1, 1)),
            Err(BookingError::InvalidDateRange { .. })
        ));
        assert_eq!(flow.draft().check_out, date(2024, 1, 2));
    }

    #[test]
    fn test_count_and_room_guards() {
        let mut flow = flow();
        assert!(matches!(
            flow.set_guests(9),
            Err(BookingError::Validation(ValidationError::InvalidGuestCount(9)))
        ));
        assert!(matches!(
            flow.set_rooms(0),
            Err(BookingError::Validation(ValidationError::InvalidRoomCount(0)))
        ));
        assert!(matches!(
            flow.select_room_type("Chalet"),
            Err(BookingError::Validation(ValidationError::UnknownRoomType(_)))
        ));
        flow.set_guests(8).unwrap();
        flow.set_rooms(5).unwrap();
        assert_eq!(flow.draft().guests, 8);
        assert_eq!(flow.draft().rooms, 5);
    }

    #[tokio::test]
    async fn test_back_returns_to_stay_details() {
        let store = MemoryStore::new();
        let mut flow = flow();
        flow.select_room_type("Standard Room").unwrap();
        flow.continue_step(&guest(), &store).await.unwrap();

        assert!(matches!(flow.set_rooms(2), Err(BookingError::WrongStep(_))));
        assert_eq!(flow.back().unwrap(), BookingStep::CollectingStayDetails);
        flow.set_rooms(2).unwrap();
    }

    #[test]
    fn test_best_promotion_auto_applied() {
        let mut flow = flow();
        let mut elsewhere = promo("other", 50.0, "FAR50");
        elsewhere.hotel_ids = vec!["h9".to_string()];

        flow.load_promotions(&[promo("p10", 10.0, "TEN"), elsewhere, promo("p25", 25.0, "QUARTER")]);

        assert_eq!(flow.eligible_promotions().len(), 2);
        assert_eq!(flow.applied_promotion().unwrap().id, "p25");
        assert_eq!(flow.draft().applied_promotion_id.as_deref(), Some("p25"));
        assert_eq!(flow.discount_percent(), 25.0);
    }

    #[test]
    fn test_no_promotions_means_full_price() {
        let mut flow = flow();
        flow.load_promotions(&[]);
        flow.select_room_type("Standard Room").unwrap();

        let quote = flow.quote().unwrap();
        assert_eq!(quote.discount_percent, 0.0);
        assert_eq!(quote.subtotal, 200.0);
        assert_eq!(quote.total, 200.0 + 200.0 * 0.15);
    }

    #[test]
    fn test_code_overrides_even_lower_discount() {
        let mut flow = flow();
        flow.load_promotions(&[promo("p30", 30.0, "BIG30"), promo("p5", 5.0, "Small5")]);
        assert_eq!(flow.discount_percent(), 30.0);

        let applied = flow.apply_promo_code("small5").unwrap();
        assert_eq!(applied.id, "p5");
        assert_eq!(flow.discount_percent(), 5.0);
    }

    #[test]
    fn test_invalid_code_keeps_applied_promotion() {
        let mut flow = flow();
        flow.load_promotions(&[promo("p30", 30.0, "BIG30")]);

        assert!(matches!(
            flow.apply_promo_code("NOPE"),
            Err(BookingError::Promotion(PromotionError::InvalidCode))
        ));
        assert_eq!(flow.applied_promotion().unwrap().id, "p30");
        assert_eq!(flow.draft().applied_promotion_id.as_deref(), Some("p30"));
    }

    #[test]
    fn test_inactive_promotion_code_is_invalid() {
        let mut flow = flow();
        let mut paused = promo("paused", 40.0, "PAUSED40");
        paused.status = PromotionStatus::Inactive;
        flow.load_promotions(&[paused]);

        assert!(flow.applied_promotion().is_none());
        assert!(matches!(
            flow.apply_promo_code("PAUSED40"),
            Err(BookingError::Promotion(PromotionError::InvalidCode))
        ));
    }
}
