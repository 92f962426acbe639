pub mod abbreviation_repo;
pub mod media_repo;
pub mod route_repo;
pub mod trash_item_repo;

pub use abbreviation_repo::AbbreviationRepo;
pub use media_repo::MediaRepo;
pub use route_repo::RouteRepo;
pub use trash_item_repo::TrashItemRepo;
