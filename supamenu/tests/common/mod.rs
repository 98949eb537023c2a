#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use supamenu::{
    ApiRequest, ApiResponse, Destination, DraftEntity, DraftMenuItem, HttpTransport, MenuCategory,
    Navigator, NotificationSink, OwnerDetails, RestaurantType, CuisineType, Severity, TransportError,
};

/// Transport that replays scripted responses and records every request.
/// Yields once before answering so concurrent callers can interleave.
#[derive(Clone, Default)]
pub struct FakeTransport {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    responses: Rc<RefCell<VecDeque<Result<ApiResponse, TransportError>>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body.as_bytes().to_vec())));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        tokio::task::yield_now().await;
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(Severity, String)> {
        self.events.borrow().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.events.borrow().iter().filter(|(s, _)| *s == severity).count()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, severity: Severity, message: &str) {
        self.events.borrow_mut().push((severity, message.to_string()));
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    redirects: Rc<RefCell<Vec<Destination>>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<Destination> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, destination: Destination) {
        self.redirects.borrow_mut().push(destination);
    }
}

/// Draft that passes every step.
pub fn valid_draft() -> DraftEntity {
    DraftEntity {
        name: "Joe's".to_string(),
        location: "Kigali Center".to_string(),
        complete_name: "Joe's Grill & Bar".to_string(),
        contact_number: "0788123456".to_string(),
        owner: OwnerDetails {
            name: "Jean Paul".to_string(),
            email: "jp@example.com".to_string(),
            phone: "0788999999".to_string(),
        },
        restaurant_type: Some(RestaurantType::Restaurant),
        cuisine_type: Some(CuisineType::African),
        menu_items: vec![DraftMenuItem {
            id: "item-1".to_string(),
            name: "Brochette".to_string(),
            price: "3500".to_string(),
            description: "Goat skewers".to_string(),
            category: MenuCategory::Main,
            image: None,
        }],
        ..DraftEntity::default()
    }
}

/// Body the backend returns for a created restaurant.
pub fn created_body(id: &str) -> String {
    format!(
        r#"{{
            "id": "{}",
            "name": "Joe's",
            "location": "Kigali Center",
            "completeName": "Joe's Grill & Bar",
            "contactNumber": "0788123456",
            "ownerName": "Jean Paul",
            "ownerEmail": "jp@example.com",
            "ownerPhone": "0788999999",
            "restaurantType": "RESTAURANT",
            "cuisineType": "AFRICAN",
            "openingHours": {{ "from": "14:00", "to": "02:00" }},
            "images": [],
            "menuItems": [
                {{ "id": "item-1", "name": "Brochette", "price": "3500", "description": "Goat skewers", "category": "MAIN" }}
            ]
        }}"#,
        id
    )
}
