use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use graph_engine_core::{Graph, Node, Orientation, Result};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "graph-engine-bench",
    about = "Time graph-engine-core traversals over synthetic topologies"
)]
struct Args {
    /// Topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target node count per graph
    #[arg(long, default_value_t = 100_000)]
    nodes: u64,

    /// Build directed graphs instead of undirected ones
    #[arg(long)]
    directed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator
    All,
    /// Branching tree (deep paths, acyclic)
    Tree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters joined by a thin bridge
    Barbell,
}

type Generator = fn(u64, Orientation) -> Result<Graph<u64>>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let orientation = if args.directed {
        Orientation::Directed
    } else {
        Orientation::Undirected
    };

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Tree => vec![("Branching tree", gen_tree)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        Mode::All => vec![
            ("Branching tree", gen_tree as Generator),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
    };

    println!("graph-engine-bench");
    println!("==================");
    println!();

    for (name, generator) in generators {
        run_benchmark(name, generator, args.nodes, orientation)?;
    }
    Ok(())
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    node_count: u64,
    orientation: Orientation,
) -> Result<()> {
    println!("--- {} ({}) ---", name, orientation);
    tracing::info!(generator = name, node_count, %orientation, "generating graph");

    let t = Instant::now();
    let graph = generator(node_count, orientation)?;
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let Some(first) = graph.nodes().first().map(|n| (*n).clone()) else {
        println!("(empty graph)");
        return Ok(());
    };
    let last = graph.nodes().last().map(|n| (*n).clone()).unwrap_or_else(|| first.clone());

    println!();
    println!("{:>22} {:>12} {:>10}", "operation", "result", "time");
    println!("{:->22} {:->12} {:->10}", "", "", "");

    let (dfs, elapsed) = timed(|| graph.dfs(&first));
    report("dfs", dfs.len(), elapsed);

    let (bfs, elapsed) = timed(|| graph.bfs(&first));
    let max_depth = bfs.distances.values().copied().max().unwrap_or(0);
    report("bfs", bfs.len(), elapsed);
    report("bfs max depth", max_depth, Duration::ZERO);

    let (path, elapsed) = timed(|| graph.shortest_path(&first, &last));
    report("shortest path hops", path?.len().saturating_sub(1), elapsed);

    let (path, elapsed) = timed(|| graph.find_path(&first, &last));
    report("dfs path hops", path?.len().saturating_sub(1), elapsed);

    let (components, elapsed) = timed(|| graph.connected_components());
    report("components", components.len(), elapsed);

    let (cycle, elapsed) = timed(|| graph.has_cycle());
    report("has cycle", usize::from(cycle), elapsed);

    let (ranked, elapsed) = timed(|| graph.degree_centrality(1));
    report(
        "max degree",
        ranked.first().map_or(0, |d| d.total_degree),
        elapsed,
    );

    println!();
    Ok(())
}

fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let t = Instant::now();
    let result = f();
    (result, t.elapsed())
}

fn report(operation: &str, value: usize, elapsed: Duration) {
    println!(
        "{:>22} {:>12} {:>8.1}ms",
        operation,
        value,
        elapsed.as_secs_f64() * 1000.0
    );
}

// ---------------------------------------------------------------------------
// Generators: single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn node(id: u64) -> Node<u64> {
    Node::new(format!("c_{}", id), id)
}

fn connect(graph: &mut Graph<u64>, from: u64, to: u64) -> Result<()> {
    if from == to {
        return Ok(());
    }
    graph.add_edge(&node(from), &node(to))
}

/// Each node spawns three children. Deep paths with exponential width.
fn gen_tree(node_count: u64, orientation: Orientation) -> Result<Graph<u64>> {
    let mut graph = Graph::with_capacity(orientation, node_count as usize);
    let branching = 3u64;
    graph.add_node(node(0))?;

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                connect(&mut graph, parent, next_id)?;
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    Ok(graph)
}

/// Ring lattice with K forward neighbors per node, each rewired with
/// probability p. High clustering, short paths.
fn gen_small_world(node_count: u64, orientation: Orientation) -> Result<Graph<u64>> {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = Graph::with_capacity(orientation, node_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        graph.add_node(node(i))?;
    }

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                connect(&mut graph, i, rng.next(node_count))?;
            } else {
                connect(&mut graph, i, neighbor)?;
            }
        }
    }

    Ok(graph)
}

/// Uniform random edges, ~5 per node. No structure.
fn gen_random(node_count: u64, orientation: Orientation) -> Result<Graph<u64>> {
    let target_edges = node_count * 5;
    let mut graph = Graph::with_capacity(orientation, node_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        graph.add_node(node(i))?;
    }
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        connect(&mut graph, from, to)?;
    }

    Ok(graph)
}

/// Two dense clusters joined by a chain of bridge nodes. Worst case for
/// "find a path through a bottleneck".
fn gen_barbell(node_count: u64, orientation: Orientation) -> Result<Graph<u64>> {
    let bridge_len = 10u64.min(node_count);
    let cluster_size = (node_count - bridge_len) / 2;
    let mut graph = Graph::with_capacity(orientation, node_count as usize);
    let mut rng = FastRng::new(99999);

    let cluster = |graph: &mut Graph<u64>, rng: &mut FastRng, offset: u64| -> Result<()> {
        for i in 0..cluster_size {
            graph.add_node(node(offset + i))?;
        }
        for i in 0..cluster_size {
            for _ in 0..10u64.min(cluster_size.saturating_sub(1)) {
                let target = rng.next(cluster_size);
                connect(graph, offset + i, offset + target)?;
            }
        }
        Ok(())
    };

    cluster(&mut graph, &mut rng, 0)?;

    // Bridge: chain from the last node of cluster A to the first of cluster B
    let bridge_start = cluster_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        graph.add_node(node(id))?;
        if id > 0 {
            connect(&mut graph, id - 1, id)?;
        }
    }

    let b_start = bridge_start + bridge_len;
    cluster(&mut graph, &mut rng, b_start)?;
    if cluster_size > 0 {
        connect(&mut graph, b_start - 1, b_start)?;
    }

    Ok(graph)
}
