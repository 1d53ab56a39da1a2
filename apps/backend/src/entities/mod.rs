pub mod candidates;
pub mod employers;
pub mod responses;
pub mod statuses;
pub mod vacancies;
