pub mod google_text_search_response;
pub mod places_service_error;
