//! Fixed collection data for the timing and route screens.
//!
//! The product renders a mock schedule and mock vehicle positions; there is
//! no live feed behind these tables.

/// Collection status for an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupStatus {
    OnTime,
    Delayed,
    Completed,
    InProgress,
}

impl PickupStatus {
    pub fn label(self) -> &'static str {
        match self {
            PickupStatus::OnTime => "On Time",
            PickupStatus::Delayed => "Delayed",
            PickupStatus::Completed => "Completed",
            PickupStatus::InProgress => "In Progress",
        }
    }
}

/// One area's collection schedule.
#[derive(Debug, Clone, Copy)]
pub struct AreaSchedule {
    pub area: &'static str,
    pub morning_window: &'static str,
    pub evening_window: &'static str,
    pub status: PickupStatus,
    pub next_pickup: &'static str,
    pub distance: &'static str,
}

/// The schedule rows shown on the timing screen.
pub fn area_schedules() -> &'static [AreaSchedule] {
    &[
        AreaSchedule {
            area: "C-Scheme",
            morning_window: "6:00 AM - 8:00 AM",
            evening_window: "5:00 PM - 7:00 PM",
            status: PickupStatus::OnTime,
            next_pickup: "6:15 AM",
            distance: "0.5 km away",
        },
        AreaSchedule {
            area: "Malviya Nagar",
            morning_window: "7:00 AM - 9:00 AM",
            evening_window: "6:00 PM - 8:00 PM",
            status: PickupStatus::Delayed,
            next_pickup: "7:30 AM",
            distance: "1.2 km away",
        },
        AreaSchedule {
            area: "Vaishali Nagar",
            morning_window: "8:00 AM - 10:00 AM",
            evening_window: "7:00 PM - 9:00 PM",
            status: PickupStatus::Completed,
            next_pickup: "Tomorrow 8:00 AM",
            distance: "2.1 km away",
        },
        AreaSchedule {
            area: "Mansarovar",
            morning_window: "6:30 AM - 8:30 AM",
            evening_window: "5:30 PM - 7:30 PM",
            status: PickupStatus::InProgress,
            next_pickup: "Now",
            distance: "0.8 km away",
        },
    ]
}

/// Vehicle status on the route screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckStatus {
    Active,
    Completed,
}

impl TruckStatus {
    pub fn label(self) -> &'static str {
        match self {
            TruckStatus::Active => "Active",
            TruckStatus::Completed => "Completed",
        }
    }
}

/// One collection vehicle's route state.
#[derive(Debug, Clone, Copy)]
pub struct TruckRoute {
    pub id: &'static str,
    pub location: &'static str,
    pub status: TruckStatus,
    pub progress_percent: u8,
    pub eta: &'static str,
    pub driver: &'static str,
}

/// The vehicles shown on the route screen.
pub fn truck_routes() -> &'static [TruckRoute] {
    &[
        TruckRoute {
            id: "TR001",
            location: "C-Scheme Main Road",
            status: TruckStatus::Active,
            progress_percent: 60,
            eta: "15 mins",
            driver: "Raj Kumar",
        },
        TruckRoute {
            id: "TR002",
            location: "Malviya Nagar Sector 2",
            status: TruckStatus::Active,
            progress_percent: 30,
            eta: "25 mins",
            driver: "Suresh Singh",
        },
        TruckRoute {
            id: "TR003",
            location: "Vaishali Nagar",
            status: TruckStatus::Completed,
            progress_percent: 100,
            eta: "Finished",
            driver: "Ramesh Gupta",
        },
    ]
}
