//! SVG rendering of the program dependency graph

use crate::Route;
use shared::graph::{self, EdgeKind, NODE_HEIGHT, NODE_WIDTH};
use shared::{Lmp, Trace};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

const PADDING: f64 = 24.0;

#[derive(Properties, PartialEq)]
pub struct DependencyGraphProps {
    pub lmps: Rc<Vec<Lmp>>,
    pub traces: Rc<Vec<Trace>>,
}

#[function_component(DependencyGraph)]
pub fn dependency_graph(props: &DependencyGraphProps) -> Html {
    let navigator = use_navigator();
    let layout = use_memo(
        (props.lmps.clone(), props.traces.clone()),
        |(lmps, traces)| graph::DependencyGraph::build(lmps, traces),
    );

    if layout.nodes.is_empty() {
        return html! {
            <div class="graph-empty">{ "No programs to graph yet" }</div>
        };
    }

    let width = layout.width() + PADDING * 2.0;
    let height = layout.height() + PADDING * 2.0;

    let edges = layout
        .edges
        .iter()
        .filter_map(|edge| {
            let from = layout.node(&edge.from)?;
            let to = layout.node(&edge.to)?;
            let class = match edge.kind {
                EdgeKind::Uses => "graph-edge",
                EdgeKind::Trace => "graph-edge trace",
            };
            Some(html! {
                <line
                    key={format!("{}->{}", edge.from, edge.to)}
                    class={class}
                    x1={(from.x + NODE_WIDTH + PADDING).to_string()}
                    y1={(from.y + NODE_HEIGHT / 2.0 + PADDING).to_string()}
                    x2={(to.x + PADDING).to_string()}
                    y2={(to.y + NODE_HEIGHT / 2.0 + PADDING).to_string()}
                    marker-end="url(#graph-arrow)"
                />
            })
        })
        .collect::<Html>();

    let nodes = layout
        .nodes
        .iter()
        .map(|node| {
            let onclick = {
                let navigator = navigator.clone();
                let name = node.id.clone();
                Callback::from(move |_: MouseEvent| {
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Lmp { name: name.clone() });
                    }
                })
            };
            let x = node.x + PADDING;
            let y = node.y + PADDING;
            html! {
                <g key={node.id.clone()} class="graph-node" {onclick}>
                    <title>{ &node.id }</title>
                    <rect
                        x={x.to_string()}
                        y={y.to_string()}
                        width={NODE_WIDTH.to_string()}
                        height={NODE_HEIGHT.to_string()}
                        rx="6"
                    />
                    <text
                        class="graph-node-label"
                        x={(x + 12.0).to_string()}
                        y={(y + 20.0).to_string()}
                    >
                        { &node.label }
                    </text>
                    <text
                        class="graph-node-meta"
                        x={(x + 12.0).to_string()}
                        y={(y + 38.0).to_string()}
                    >
                        { shared::display::version_count_label(node.version_count) }
                    </text>
                </g>
            }
        })
        .collect::<Html>();

    html! {
        <div class="graph-container">
            <svg
                class="dependency-graph"
                width={width.to_string()}
                height={height.to_string()}
                viewBox={format!("0 0 {} {}", width, height)}
            >
                <defs>
                    <marker
                        id="graph-arrow"
                        viewBox="0 0 10 10"
                        refX="10"
                        refY="5"
                        markerWidth="8"
                        markerHeight="8"
                        orient="auto-start-reverse"
                    >
                        <path d="M 0 0 L 10 5 L 0 10 z" />
                    </marker>
                </defs>
                { edges }
                { nodes }
            </svg>
        </div>
    }
}
