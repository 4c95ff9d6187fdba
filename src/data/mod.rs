pub mod geojson;
pub mod markup;
pub mod notification;
pub mod tournament;
