//! Benchmark for LOD mesh generation.
//!
//! Meshes a 256³ block at every LOD level for five fill patterns, once
//! textured and once textureless, as a map would be meshed for both render
//! paths.
//!
//! Run with: cargo bench --package lod_mesher --bench lod_mesh_gen

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec3;
use lod_mesher::{
    ContentFeatures, ContentId, ContentRegistry, DrawType, LodConfig, LodMeshGenerator, Material,
    MeshCollector, MeshMakeData, Node, ParamLighting, TileResolver, VoxelGrid, MAX_LOD,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDE: i32 = 256;

#[derive(Clone, Copy, Debug)]
enum MapPattern {
    AllAir,
    AllStone,
    Half,
    Striped,
    Random,
}

const PATTERNS: [MapPattern; 5] = [
    MapPattern::AllAir,
    MapPattern::AllStone,
    MapPattern::Half,
    MapPattern::Striped,
    MapPattern::Random,
];

struct Contents {
    stone: ContentId,
    water: ContentId,
}

struct ContentTiles;

impl TileResolver for ContentTiles {
    fn resolve_tile(&self, node: Node, _blockpos_nodes: IVec3, face: usize) -> Material {
        Material::Tile(u32::from(node.content) * 6 + face as u32)
    }
}

fn build_map(pattern: MapPattern, contents: &Contents) -> VoxelGrid {
    let mut grid = VoxelGrid::with_margin(SIDE).expect("valid grid size");
    let stone = Node::new(contents.stone);
    let water = Node::new(contents.water);
    let max = IVec3::splat(SIDE - 1);

    match pattern {
        MapPattern::AllAir => {}
        MapPattern::AllStone => grid.fill(IVec3::ZERO, max, stone),
        MapPattern::Half => {
            grid.fill_with(IVec3::ZERO, IVec3::new(127, SIDE - 1, 127), |p| match p.y {
                y if y > 64 => None,
                y if y > 32 => Some(water),
                _ => Some(stone),
            });
        }
        MapPattern::Striped => grid.fill_with(IVec3::ZERO, max, |p| (p.x % 9 < 3).then_some(stone)),
        MapPattern::Random => {
            let mut rng = StdRng::seed_from_u64(0xC0FFEE);
            grid.fill_with(IVec3::ZERO, max, |_| {
                if rng.gen_range(0..100) < 50 {
                    return None;
                }
                match rng.gen_range(0..100) {
                    n if n > 60 => None,
                    n if n > 30 => Some(water),
                    _ => Some(stone),
                }
            });
        }
    }

    grid
}

fn benchmark_lod_mesh_gen(c: &mut Criterion) {
    let mut defs = ContentRegistry::new();
    let contents = Contents {
        stone: defs
            .register(ContentFeatures::new("stone", DrawType::Normal))
            .expect("free content id"),
        water: defs
            .register(ContentFeatures::new("water", DrawType::Liquid))
            .expect("free content id"),
    };

    let mut group = c.benchmark_group("lod_mesh_gen");
    group.sample_size(10);

    for pattern in PATTERNS {
        let grid = build_map(pattern, &contents);

        for lod in 1..=MAX_LOD {
            group.bench_with_input(
                BenchmarkId::new(format!("{pattern:?}"), format!("lod_{lod}")),
                &lod,
                |b, &lod| {
                    b.iter(|| {
                        let mut collector = MeshCollector::new();
                        for textureless in [true, false] {
                            let data =
                                MeshMakeData::new(&grid, &defs, &ParamLighting, IVec3::ZERO, SIDE)
                                    .expect("valid side length")
                                    .with_tiles(&ContentTiles);
                            let config = LodConfig { textureless, ..Default::default() };
                            let mut generator = LodMeshGenerator::new(data, &mut collector, config)
                                .expect("valid config");
                            black_box(generator.generate(lod));
                        }
                        black_box(collector.quad_count())
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_lod_mesh_gen);
criterion_main!(benches);
