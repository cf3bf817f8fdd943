pub mod api_client;
pub mod grid_view_service;
pub mod itinerary_grid_service;
pub mod itinerary_store;
pub mod stop_form_service;
