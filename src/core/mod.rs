pub mod access_collection;
pub mod animation;
pub mod figure;
pub mod figure_access;
pub mod figure_list;
pub mod geometry;

pub use access_collection::FigureAccessCollection;
pub use animation::{AnimationTask, Easing};
pub use figure::{Figure, FigureField, FigureId, FigureListener, FigureRef, FigureSource, Subscription};
pub use figure_access::FigureAccess;
pub use figure_list::{FigureCollection, FigureList, FigureListChange, FigureListListener};
pub use geometry::{circle_path, pie_path, polygon_path};
