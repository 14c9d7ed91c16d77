use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status: {}", other)),
        }
    }
}

/// A finalized booking. Only `status` changes after creation.
///
/// Dates are kept as `yyyy-MM-dd` strings because that is the shape the
/// admin dashboard reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub hotel_id: String,
    pub hotel_name: String,
    pub guest_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub rooms: u32,
    #[serde(default)]
    pub room_type: String,
    pub status: ReservationStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Reservation {
    /// Case-insensitive match on hotel name, guest name or email.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.hotel_name.to_lowercase().contains(&query)
            || self.guest_name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.id,
            self.hotel_name,
            self.guest_name,
            self.email,
            self.check_in,
            self.check_out,
            self.status.as_str(),
            self.total_amount
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub total_revenue: f64,
}

impl ReservationStats {
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        Self {
            total: reservations.len(),
            pending: reservations
                .iter()
                .filter(|r| r.status == ReservationStatus::Pending)
                .count(),
            confirmed: reservations
                .iter()
                .filter(|r| r.status == ReservationStatus::Confirmed)
                .count(),
            total_revenue: reservations.iter().map(|r| r.total_amount).sum(),
        }
    }
}

/// Reservations the admin dashboard starts with when nothing is stored yet.
pub fn sample_reservations() -> Vec<Reservation> {
    let sample = |id: &str,
                  hotel_name: &str,
                  guest_name: &str,
                  email: &str,
                  check_in: &str,
                  check_out: &str,
                  guests: u32,
                  rooms: u32,
                  status: ReservationStatus,
                  total_amount: f64| Reservation {
        id: id.to_string(),
        hotel_id: id.to_string(),
        hotel_name: hotel_name.to_string(),
        guest_name: guest_name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        guests,
        rooms,
        room_type: String::new(),
        status,
        total_amount,
        special_requests: String::new(),
        user_id: None,
    };

    vec![
        sample(
            "1",
            "Grand Hotel",
            "John Smith",
            "john.smith@example.com",
            "2023-12-15",
            "2023-12-20",
            2,
            1,
            ReservationStatus::Confirmed,
            900.0,
        ),
        sample(
            "2",
            "Coastal Resort",
            "Sarah Johnson",
            "sarah.j@example.com",
            "2024-01-10",
            "2024-01-17",
            4,
            2,
            ReservationStatus::Pending,
            1540.0,
        ),
        sample(
            "3",
            "City View Hotel",
            "Michael Brown",
            "michael.brown@example.com",
            "2023-11-25",
            "2023-11-28",
            1,
            1,
            ReservationStatus::Completed,
            1050.0,
        ),
    ]
}
