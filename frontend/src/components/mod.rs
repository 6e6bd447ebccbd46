mod badge;
mod card;
mod dependency_graph;
mod resizable;
mod scroll_area;

pub use badge::{Badge, BadgeVariant};
pub use card::{Card, CardContent, CardHeader};
pub use dependency_graph::DependencyGraph;
pub use resizable::ResizablePanelGroup;
pub use scroll_area::ScrollArea;
