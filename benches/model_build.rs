use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metro_graph::layout::{generate_hub_icon, GraphModelBuilder, IconOutline};
use metro_graph::models::{Edge, Graph, Path, PathStep, Station};
use metro_graph::MapConfig;

const LINES: usize = 15;
const STATIONS_PER_LINE: usize = 20;
const COLORS: [&str; 5] = ["#D6083B", "#0078BE", "#19C1F3", "#894E35", "#4FB04F"];

/// Radial network of straight lines; station `k` of every line sits on a
/// shared ring so every fifth ring forms an interchange.
#[allow(clippy::cast_precision_loss)]
fn synthetic_network() -> Graph {
    let mut stations = Vec::new();
    let mut edges = Vec::new();

    for line in 0..LINES {
        let angle = line as f64 / LINES as f64 * std::f64::consts::TAU;
        for k in 0..STATIONS_PER_LINE {
            let r = 0.01 * (k + 1) as f64;
            let name = if k % 5 == 0 { format!("Ring {k}") } else { format!("L{line} S{k}") };
            stations.push(Station {
                id: format!("{line}.{k}"),
                name,
                line_id: line.to_string(),
                line_name: format!("Line {line}"),
                line_color: COLORS[line % COLORS.len()].trim_start_matches('#').to_string(),
                lat: 55.75 + r * angle.sin(),
                lng: 37.62 + r * angle.cos(),
            });
            if k > 0 {
                edges.push(Edge { from_id: format!("{line}.{}", k - 1), to_id: format!("{line}.{k}"), is_transfer: false });
                edges.push(Edge { from_id: format!("{line}.{k}"), to_id: format!("{line}.{}", k - 1), is_transfer: false });
            }
            if k % 5 == 0 && line > 0 {
                edges.push(Edge { from_id: format!("{}.{k}", line - 1), to_id: format!("{line}.{k}"), is_transfer: true });
            }
        }
    }

    Graph { stations, edges }
}

fn route_along_line(line: usize) -> Path {
    let path: Vec<PathStep> = (0..STATIONS_PER_LINE)
        .map(|k| PathStep {
            station_id: format!("{line}.{k}"),
            station_name: String::new(),
            line_name: format!("Line {line}"),
            is_transfer: false,
        })
        .collect();
    Path {
        total_steps: path.len() - 1,
        stations_count: path.len(),
        path,
        ..Path::default()
    }
}

fn benchmark_model_build(c: &mut Criterion) {
    let config = MapConfig::default();
    let graph = synthetic_network();
    let route = route_along_line(3);
    let builder = GraphModelBuilder::new(&config);

    c.bench_function("build_plain", |b| {
        b.iter(|| builder.build(black_box(Some(&graph)), None));
    });

    c.bench_function("build_with_route", |b| {
        b.iter(|| builder.build(black_box(Some(&graph)), black_box(Some(&route))));
    });

    let colors: Vec<String> = COLORS.iter().map(|c| (*c).to_string()).collect();
    let outline = IconOutline { color: config.hub_outline_color.clone(), width: config.hub_outline_width };
    c.bench_function("hub_icon_5_lines", |b| {
        b.iter(|| generate_hub_icon(black_box(&colors), config.hub_icon_size, &outline));
    });
}

criterion_group!(benches, benchmark_model_build);
criterion_main!(benches);
