//! Core simulation state for the forager ant colony.
//!
//! The world is a continuous toroidal plane carrying two discretized
//! pheromone fields (one per trail channel), a bucketed grid of food
//! sources, and a fixed population of ants. Each tick decays the fields,
//! fans the ant updates out over a worker pool, commits the resulting
//! deposits and food picks serially, and sweeps depleted food. Rendering
//! hosts consume value snapshots; nothing in this crate draws.

use forager_index::{GridGeometry, GridItem, IndexError, ObjectGrid};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

new_key_type! {
    /// Stable handle for ants backed by a generational slot map.
    pub struct AntId;
}

const HALF_TURN: f32 = std::f32::consts::PI;
const FULL_TURN: f32 = std::f32::consts::TAU;

/// Minimal copyable 2D vector used for positions and directions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Origin vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians.
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Angle of this vector in radians.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// High level simulation clock (ticks processed since boot).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tick(pub u64);

impl Tick {
    /// Returns the next sequential tick.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Resets the tick counter back to zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

/// Pheromone trail channel selector.
///
/// `ToFood` cells guide seekers toward confirmed food; `ToHome` cells guide
/// carriers back to the colony.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    ToFood,
    ToHome,
}

/// Behavioral phase of an ant. The machine has exactly two states and no
/// terminal state; an ant alternates between them for the whole run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    SeekingFood,
    ReturningHome,
}

impl Phase {
    /// Field sampled while steering in this phase.
    #[must_use]
    pub const fn sense_channel(self) -> Channel {
        match self {
            Self::SeekingFood => Channel::ToFood,
            Self::ReturningHome => Channel::ToHome,
        }
    }

    /// Field deposited into while in this phase.
    ///
    /// A seeker lays the trail a later carrier follows home, and vice
    /// versa, so the trail channel is always the opposite of the sense
    /// channel.
    #[must_use]
    pub const fn trail_channel(self) -> Channel {
        match self {
            Self::SeekingFood => Channel::ToHome,
            Self::ReturningHome => Channel::ToFood,
        }
    }

    /// Transition taken on contact with a food source, if any.
    #[must_use]
    pub const fn on_food_contact(self) -> Option<Self> {
        match self {
            Self::SeekingFood => Some(Self::ReturningHome),
            Self::ReturningHome => None,
        }
    }

    /// Transition taken on contact with the colony anchor, if any.
    #[must_use]
    pub const fn on_colony_contact(self) -> Option<Self> {
        match self {
            Self::ReturningHome => Some(Self::SeekingFood),
            Self::SeekingFood => None,
        }
    }
}

/// One cell of a pheromone field.
///
/// `permanent` is a count, not a flag: several sources of permanence may
/// overlap on one cell and the cell only resumes decaying once every one
/// of them has been cleared.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub intensity: f32,
    pub permanent: u32,
}

/// Per-cell state exposed to rendering hosts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CellSnapshot {
    pub intensity: f32,
    pub permanent: bool,
}

/// Read-only copy of one pheromone field for overlay rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: f32,
    pub cells: Vec<CellSnapshot>,
}

/// Discretized scalar field the ants deposit into and sense.
///
/// Transient intensity is clamped on deposit and decays linearly toward
/// zero; cells holding a permanent beacon are exempt from both until the
/// beacon is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PheromoneField {
    geometry: GridGeometry,
    max_intensity: f32,
    decay_rate: f32,
    residual_intensity: f32,
    cells: Vec<Cell>,
}

impl PheromoneField {
    fn new(
        geometry: GridGeometry,
        max_intensity: f32,
        decay_rate: f32,
        residual_intensity: f32,
    ) -> Self {
        Self {
            geometry,
            max_intensity,
            decay_rate,
            residual_intensity,
            cells: vec![Cell::default(); geometry.len()],
        }
    }

    /// Underlying grid geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Raw cell storage in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Add `amount` of pheromone at a continuous position.
    ///
    /// While any permanence is registered on the target cell the intensity
    /// cap is bypassed; otherwise the result is clamped to the transient
    /// maximum. Exactly one cell is mutated.
    pub fn deposit(&mut self, position: Vec2, amount: f32, permanent: bool) {
        let (col, row) = self.geometry.cell_of(position.x, position.y);
        let cell = &mut self.cells[row * self.geometry.cols() + col];
        cell.intensity += amount;
        if permanent {
            cell.permanent += 1;
        }
        if cell.permanent == 0 {
            cell.intensity = cell.intensity.clamp(0.0, self.max_intensity);
        }
    }

    /// Read-only copy of the cell at `position` offset by whole cells.
    ///
    /// Total function: the combined coordinate wraps back in-bounds.
    #[must_use]
    pub fn query(&self, position: Vec2, offset: (i32, i32)) -> Cell {
        let (col, row) = self.geometry.cell_of(position.x, position.y);
        self.cell_at(col as i64 + offset.0 as i64, row as i64 + offset.1 as i64)
    }

    /// Read-only copy of the cell at signed cell coordinates (wrapping).
    #[must_use]
    pub fn cell_at(&self, col: i64, row: i64) -> Cell {
        self.cells[self.geometry.index_of(col, row)]
    }

    /// Fade every non-permanent cell toward zero.
    ///
    /// Linear decay at `decay_rate` per simulated second, floored at zero.
    /// Rows are sharded across the ambient rayon pool; cells are
    /// independent so the pass is deterministic at any worker count.
    pub fn decay(&mut self, dt: f32) {
        let step = self.decay_rate * dt;
        if step <= 0.0 {
            return;
        }
        let cols = self.geometry.cols();
        self.cells.par_chunks_mut(cols).for_each(|band| {
            for cell in band {
                if cell.permanent == 0 {
                    cell.intensity = (cell.intensity - step).max(0.0);
                }
            }
        });
    }

    /// Drop one level of permanence at `position`.
    ///
    /// When the last level clears, the residual intensity is clamped under
    /// the configured remnant so the cell rejoins normal decay instead of
    /// lingering as a stale full-strength column.
    pub fn clear_permanent(&mut self, position: Vec2) {
        let (col, row) = self.geometry.cell_of(position.x, position.y);
        let cell = &mut self.cells[row * self.geometry.cols() + col];
        if cell.permanent > 0 {
            cell.permanent -= 1;
            if cell.permanent == 0 {
                cell.intensity = cell.intensity.min(self.residual_intensity);
            }
        }
    }

    /// Sum of intensity over every cell (diagnostic).
    #[must_use]
    pub fn total_intensity(&self) -> f32 {
        self.cells.iter().map(|cell| cell.intensity).sum()
    }

    /// Build a render-able copy of the whole field.
    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            cols: self.geometry.cols(),
            rows: self.geometry.rows(),
            cell_size: self.geometry.cell_size(),
            cells: self
                .cells
                .iter()
                .map(|cell| CellSnapshot {
                    intensity: cell.intensity,
                    permanent: cell.permanent > 0,
                })
                .collect(),
        }
    }
}

/// Monotonic identifier assigned to food sources by the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FoodId(pub u64);

/// Consumable resource placed on the plane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSource {
    id: FoodId,
    position: Vec2,
    radius: f32,
    quantity: f32,
}

impl FoodSource {
    fn new(id: FoodId, position: Vec2, radius: f32, quantity: f32) -> Self {
        Self {
            id,
            position,
            radius,
            quantity,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> FoodId {
        self.id
    }

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Pickup radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Units remaining.
    #[must_use]
    pub const fn quantity(&self) -> f32 {
        self.quantity
    }

    /// Remove one unit, returning whether a unit was actually taken.
    ///
    /// Sole mutator of `quantity`; the world commits picks serially so a
    /// source can never be over-drawn by same-tick contenders.
    pub fn pick(&mut self) -> bool {
        if self.quantity > 0.0 {
            self.quantity -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whether the source is exhausted and due for removal.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.quantity <= 0.0
    }
}

impl GridItem for FoodSource {
    fn position(&self) -> (f32, f32) {
        (self.position.x, self.position.y)
    }
}

/// Food state exposed to rendering hosts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FoodSnapshot {
    pub position: Vec2,
    pub radius: f32,
    pub quantity: f32,
}

/// Ant state exposed to rendering hosts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AntSnapshot {
    pub position: Vec2,
    pub heading: f32,
    pub phase: Phase,
}

/// Pheromone drop requested by an ant, committed after the parallel phase.
#[derive(Debug, Clone, Copy)]
struct TrailDeposit {
    channel: Channel,
    position: Vec2,
    amount: f32,
}

/// Food pickup requested by an ant, committed serially.
#[derive(Debug, Clone, Copy)]
struct PickIntent {
    position: Vec2,
    id: FoodId,
}

/// Per-ant side effects produced by one update.
///
/// The parallel phase mutates only the ant's own state; everything that
/// touches shared structures is returned here and applied in ant order by
/// the world, which keeps the tick deterministic for a fixed seed at any
/// worker count.
#[derive(Debug, Default)]
struct AntEffects {
    deposit: Option<TrailDeposit>,
    pick: Option<PickIntent>,
    delivered: bool,
}

/// Read-only view of shared world state handed to the parallel ant phase.
struct TickView<'a> {
    config: &'a ForagerConfig,
    to_food: &'a PheromoneField,
    to_home: &'a PheromoneField,
    food: &'a ObjectGrid<FoodSource>,
}

impl TickView<'_> {
    fn field(&self, channel: Channel) -> &PheromoneField {
        match channel {
            Channel::ToFood => self.to_food,
            Channel::ToHome => self.to_home,
        }
    }
}

/// One foraging agent.
///
/// Owns its position, heading, phase, deposit reserve, and a private RNG
/// split from the world RNG at spawn. Never destroyed during a run.
#[derive(Debug, Clone)]
pub struct Ant {
    colony: Vec2,
    position: Vec2,
    heading: f32,
    reserve: f32,
    phase: Phase,
    steer_timer: f32,
    deposit_timer: f32,
    rng: SmallRng,
}

impl Ant {
    fn spawn(position: Vec2, heading: f32, config: &ForagerConfig, mut rng: SmallRng) -> Self {
        // Random timer offsets keep the population from updating in sync.
        let steer_timer = rng.gen_range(0.0..config.direction_update_period);
        let deposit_timer = rng.gen_range(0.0..config.deposit_period);
        Self {
            colony: position,
            position,
            heading,
            reserve: config.max_reserve,
            phase: Phase::SeekingFood,
            steer_timer,
            deposit_timer,
            rng,
        }
    }

    /// Colony anchor this ant homes to.
    #[must_use]
    pub const fn colony(&self) -> Vec2 {
        self.colony
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current heading in radians.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Current behavioral phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining pheromone deposit budget.
    #[must_use]
    pub const fn reserve(&self) -> f32 {
        self.reserve
    }

    fn update(&mut self, dt: f32, view: &TickView<'_>) -> AntEffects {
        let mut effects = AntEffects::default();

        self.advance(dt, view.config);
        self.check_colony(view.config, &mut effects);
        if self.phase == Phase::SeekingFood {
            self.check_food(view, &mut effects);
        }

        self.steer_timer += dt;
        if self.steer_timer >= view.config.direction_update_period {
            self.steer(view);
            let jitter = view.config.heading_jitter;
            if jitter > 0.0 {
                self.heading += self.rng.gen_range(-0.5 * jitter..0.5 * jitter);
            }
            self.steer_timer = 0.0;
        }

        self.deposit_timer += dt;
        if self.deposit_timer >= view.config.deposit_period {
            self.lay_trail(view.config, &mut effects);
            self.deposit_timer = 0.0;
        }

        effects
    }

    fn advance(&mut self, dt: f32, config: &ForagerConfig) {
        let step = Vec2::from_angle(self.heading) * (config.ant_speed * dt);
        let moved = self.position + step;
        self.position = Vec2::new(
            moved.x.rem_euclid(config.world_width),
            moved.y.rem_euclid(config.world_height),
        );
    }

    fn check_colony(&mut self, config: &ForagerConfig, effects: &mut AntEffects) {
        if self.position.distance(self.colony) >= config.colony_radius {
            return;
        }
        // Visiting home refreshes the trail budget even when empty-handed.
        self.reserve = config.max_reserve;
        if let Some(next) = self.phase.on_colony_contact() {
            self.phase = next;
            self.heading += HALF_TURN;
            effects.delivered = true;
        }
    }

    fn check_food(&mut self, view: &TickView<'_>, effects: &mut AntEffects) {
        let mut contact: Option<(FoodId, Vec2)> = None;
        view.food.neighbors(self.position.x, self.position.y, |food| {
            if contact.is_none()
                && !food.is_done()
                && self.position.distance(food.position()) < food.radius()
            {
                contact = Some((food.id(), food.position()));
            }
        });
        let Some((id, position)) = contact else {
            return;
        };
        if let Some(next) = self.phase.on_food_contact() {
            self.phase = next;
            self.heading += HALF_TURN;
            self.reserve = view.config.max_reserve;
            effects.pick = Some(PickIntent { position, id });
        }
    }

    /// Sample the phase-matching field over a forward cone and re-aim.
    ///
    /// A permanent cell anywhere in the cone wins outright: beacons are
    /// certain knowledge and override gradient blending. Otherwise the ant
    /// steers at the intensity-weighted centroid of the sampled cells, and
    /// an empty cone leaves the heading untouched.
    fn steer(&mut self, view: &TickView<'_>) {
        let field = view.field(self.phase.sense_channel());
        let geometry = field.geometry();
        let range = view.config.sense_range_cells as i64;
        let max_distance = range as f32 * geometry.cell_size();
        let heading_vec = Vec2::from_angle(self.heading);
        let (col, row) = geometry.cell_of(self.position.x, self.position.y);

        let mut total = 0.0f32;
        let mut weighted = Vec2::ZERO;
        for row_offset in -range..=range {
            for col_offset in -range..=range {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }
                let target_col = col as i64 + col_offset;
                let target_row = row as i64 + row_offset;
                let (cx, cy) = geometry.cell_center(target_col, target_row);
                let cell_pos = Vec2::new(cx, cy);
                let to_cell = cell_pos - self.position;
                if to_cell.dot(heading_vec) <= 0.0 || to_cell.length() >= max_distance {
                    continue;
                }
                let cell = field.cell_at(target_col, target_row);
                if cell.permanent > 0 {
                    self.face(cell_pos);
                    return;
                }
                if cell.intensity > 0.0 {
                    total += cell.intensity;
                    weighted = weighted + cell_pos * cell.intensity;
                }
            }
        }

        if total > 0.0 {
            self.face(weighted * (1.0 / total));
        }
    }

    fn face(&mut self, target: Vec2) {
        self.heading = (target - self.position).angle();
    }

    fn lay_trail(&mut self, config: &ForagerConfig, effects: &mut AntEffects) {
        if self.reserve > config.reserve_floor {
            effects.deposit = Some(TrailDeposit {
                channel: self.phase.trail_channel(),
                position: self.position,
                amount: self.reserve * config.deposit_fraction,
            });
            // Finite marking capacity: trails weaken with distance from
            // the last refuel point.
            self.reserve *= config.reserve_decay;
        }
    }
}

/// Dense ant storage with generational handles.
#[derive(Debug, Default)]
pub struct AntArena {
    slots: SlotMap<AntId, usize>,
    handles: Vec<AntId>,
    rows: Vec<Ant>,
}

impl AntArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live ants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no ants are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if `id` refers to a live ant.
    #[must_use]
    pub fn contains(&self, id: AntId) -> bool {
        self.slots.contains_key(id)
    }

    /// Iterate over live handles in dense order.
    pub fn iter_handles(&self) -> impl Iterator<Item = AntId> + '_ {
        self.handles.iter().copied()
    }

    /// Dense row storage.
    #[must_use]
    pub fn rows(&self) -> &[Ant] {
        &self.rows
    }

    fn rows_mut(&mut self) -> &mut [Ant] {
        &mut self.rows
    }

    /// Borrow an ant by handle.
    #[must_use]
    pub fn get(&self, id: AntId) -> Option<&Ant> {
        self.slots.get(id).map(|&index| &self.rows[index])
    }

    fn insert(&mut self, ant: Ant) -> AntId {
        let index = self.rows.len();
        self.rows.push(ant);
        let id = self.slots.insert(index);
        self.handles.push(id);
        id
    }

    /// Remove `id`, returning the ant if it was present.
    ///
    /// Not used by the tick pipeline (population is fixed during a run)
    /// but kept for host-driven resets.
    pub fn remove(&mut self, id: AntId) -> Option<Ant> {
        let index = self.slots.remove(id)?;
        let removed = self.rows.swap_remove(index);
        let removed_handle = self.handles.swap_remove(index);
        debug_assert_eq!(removed_handle, id);
        if index < self.handles.len() {
            let moved = self.handles[index];
            if let Some(slot) = self.slots.get_mut(moved) {
                *slot = index;
            }
        }
        Some(removed)
    }

    /// Remove all ants.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.handles.clear();
        self.rows.clear();
    }
}

/// Errors that can occur when constructing a world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Spatial structure construction failed.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// The worker pool could not be built.
    #[error("worker pool construction failed: {0}")]
    WorkerPool(String),
}

/// Static configuration for a forager world.
///
/// Every named numeric parameter of the simulation lives here with a
/// documented default; `World::new` validates the whole set before any
/// tick runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForagerConfig {
    /// Width of the world in world units.
    pub world_width: f32,
    /// Height of the world in world units.
    pub world_height: f32,
    /// Edge length of one pheromone cell in world units.
    pub pheromone_cell_size: f32,
    /// Edge length of one food bucket in world units. Food pickup reach is
    /// one bucket, so this should exceed the food radius.
    pub food_cell_size: f32,
    /// Intensity cap applied to non-permanent cells on deposit.
    pub max_cell_intensity: f32,
    /// Linear fade applied to transient cells, in intensity per second.
    pub decay_rate: f32,
    /// Intensity left behind when a depleted beacon loses permanence.
    pub depleted_residual_intensity: f32,
    /// Hard capacity of one food bucket; inserts beyond it are dropped.
    pub max_per_cell: usize,
    /// Radius around the colony anchor that counts as home.
    pub colony_radius: f32,
    /// Pickup radius assigned to placed food sources.
    pub food_radius: f32,
    /// Ant movement speed in world units per second.
    pub ant_speed: f32,
    /// Deposit budget granted at spawn and on every refuel.
    pub max_reserve: f32,
    /// Reserve level below which an ant stops laying trail.
    pub reserve_floor: f32,
    /// Fraction of the current reserve deposited per trail drop.
    pub deposit_fraction: f32,
    /// Multiplicative reserve shrink applied after each drop.
    pub reserve_decay: f32,
    /// Seconds between steering updates.
    pub direction_update_period: f32,
    /// Seconds between trail drops.
    pub deposit_period: f32,
    /// Width of the uniform random heading jitter band, in radians.
    pub heading_jitter: f32,
    /// Steering lookahead in pheromone cells (Chebyshev).
    pub sense_range_cells: u32,
    /// Worker threads for the tick pipeline; 0 uses one per core.
    pub worker_threads: usize,
    /// Optional RNG seed for reproducible worlds.
    pub rng_seed: Option<u64>,
    /// Maximum number of recent tick summaries retained in-memory.
    pub history_capacity: usize,
}

impl Default for ForagerConfig {
    fn default() -> Self {
        Self {
            world_width: 1600.0,
            world_height: 900.0,
            pheromone_cell_size: 2.0,
            food_cell_size: 5.0,
            max_cell_intensity: 500.0,
            decay_rate: 1.0,
            depleted_residual_intensity: 50.0,
            max_per_cell: 64,
            colony_radius: 20.0,
            food_radius: 4.0,
            ant_speed: 50.0,
            max_reserve: 1000.0,
            reserve_floor: 1.0,
            deposit_fraction: 0.02,
            reserve_decay: 0.98,
            direction_update_period: 0.125,
            deposit_period: 0.25,
            heading_jitter: HALF_TURN * 0.08,
            sense_range_cells: 10,
            worker_threads: 0,
            rng_seed: None,
            history_capacity: 256,
        }
    }
}

impl ForagerConfig {
    /// Reject malformed parameter sets before any tick runs.
    fn validate(&self) -> Result<(), WorldError> {
        if !(self.world_width > 0.0) || !(self.world_height > 0.0) {
            return Err(WorldError::InvalidConfig(
                "world dimensions must be positive",
            ));
        }
        if !(self.pheromone_cell_size > 0.0) || !(self.food_cell_size > 0.0) {
            return Err(WorldError::InvalidConfig("cell sizes must be positive"));
        }
        if self.max_per_cell == 0 {
            return Err(WorldError::InvalidConfig("max_per_cell must be non-zero"));
        }
        if !(self.max_cell_intensity > 0.0) {
            return Err(WorldError::InvalidConfig(
                "max_cell_intensity must be positive",
            ));
        }
        if self.decay_rate < 0.0 || self.depleted_residual_intensity < 0.0 {
            return Err(WorldError::InvalidConfig(
                "decay_rate and depleted_residual_intensity must be non-negative",
            ));
        }
        if !(self.colony_radius > 0.0) || !(self.food_radius > 0.0) {
            return Err(WorldError::InvalidConfig(
                "colony_radius and food_radius must be positive",
            ));
        }
        if self.ant_speed < 0.0 || self.heading_jitter < 0.0 {
            return Err(WorldError::InvalidConfig(
                "ant_speed and heading_jitter must be non-negative",
            ));
        }
        if !(self.max_reserve > 0.0)
            || self.reserve_floor < 0.0
            || !(0.0..=1.0).contains(&self.deposit_fraction)
            || !(0.0..=1.0).contains(&self.reserve_decay)
        {
            return Err(WorldError::InvalidConfig(
                "reserve parameters out of range",
            ));
        }
        if !(self.direction_update_period > 0.0) || !(self.deposit_period > 0.0) {
            return Err(WorldError::InvalidConfig("timer periods must be positive"));
        }
        if self.sense_range_cells == 0 {
            return Err(WorldError::InvalidConfig(
                "sense_range_cells must be non-zero",
            ));
        }
        if self.history_capacity == 0 {
            return Err(WorldError::InvalidConfig(
                "history_capacity must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the configured RNG, seeding from entropy when absent.
    fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        }
    }
}

/// Fixed-size task-parallel executor driving the tick phases.
///
/// Each phase fans out over the pool and blocks the caller until the
/// fan-in completes; that barrier is the only synchronization the tick
/// needs. No ordering is guaranteed between items inside a phase.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}

impl WorkerPool {
    /// Build a pool with `threads` workers; 0 selects one per core.
    pub fn new(threads: usize) -> Result<Self, WorldError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if threads > 0 {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|err| WorldError::WorkerPool(err.to_string()))?;
        let workers = pool.current_num_threads();
        Ok(Self { pool, workers })
    }

    /// Number of worker threads.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` inside the pool, blocking until it completes.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.pool.install(op)
    }
}

/// Events emitted after processing a world tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TickEvents {
    pub tick: Tick,
    /// Food units successfully removed this tick.
    pub pickups: u32,
    /// Carriers that reached the colony this tick.
    pub deliveries: u32,
    /// Food sources removed by the depletion sweep this tick.
    pub depleted: u32,
}

/// Per-tick aggregate retained in the world history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickSummary {
    pub tick: Tick,
    pub ant_count: usize,
    pub food_count: usize,
    pub pickups: u32,
    pub deliveries: u32,
    pub depleted: u32,
    pub total_intensity: f32,
}

/// Aggregate world state: fields, food grid, ants, and the tick driver.
pub struct World {
    config: ForagerConfig,
    tick: Tick,
    rng: SmallRng,
    to_food: PheromoneField,
    to_home: PheromoneField,
    food: ObjectGrid<FoodSource>,
    ants: AntArena,
    pool: WorkerPool,
    next_food_id: u64,
    history: VecDeque<TickSummary>,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("ant_count", &self.ants.len())
            .field("food_count", &self.food.len())
            .finish()
    }
}

impl World {
    /// Instantiate a new world using the supplied configuration.
    pub fn new(config: ForagerConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let geometry = GridGeometry::new(
            config.world_width,
            config.world_height,
            config.pheromone_cell_size,
        )?;
        let to_food = PheromoneField::new(
            geometry,
            config.max_cell_intensity,
            config.decay_rate,
            config.depleted_residual_intensity,
        );
        let to_home = to_food.clone();
        let food = ObjectGrid::new(
            config.world_width,
            config.world_height,
            config.food_cell_size,
            config.max_per_cell,
        )?;
        let pool = WorkerPool::new(config.worker_threads)?;
        let rng = config.seeded_rng();
        info!(
            field_cols = geometry.cols(),
            field_rows = geometry.rows(),
            workers = pool.workers(),
            "forager world initialised"
        );
        let history_capacity = config.history_capacity;
        Ok(Self {
            config,
            tick: Tick::zero(),
            rng,
            to_food,
            to_home,
            food,
            ants: AntArena::new(),
            pool,
            next_food_id: 0,
            history: VecDeque::with_capacity(history_capacity),
        })
    }

    /// Immutable access to the configuration.
    #[must_use]
    pub const fn config(&self) -> &ForagerConfig {
        &self.config
    }

    /// Current simulation tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Number of live ants.
    #[must_use]
    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }

    /// Number of live food sources.
    #[must_use]
    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    /// Read-only access to the ant arena.
    #[must_use]
    pub const fn ants(&self) -> &AntArena {
        &self.ants
    }

    /// Read-only access to a pheromone field.
    #[must_use]
    pub const fn field(&self, channel: Channel) -> &PheromoneField {
        match channel {
            Channel::ToFood => &self.to_food,
            Channel::ToHome => &self.to_home,
        }
    }

    /// Iterate over retained tick summaries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TickSummary> {
        self.history.iter()
    }

    /// Place a food source, marking a permanent beacon on the food field.
    ///
    /// Returns `false` when the target bucket is full; no beacon is placed
    /// in that case and the request is dropped.
    pub fn place_food(&mut self, x: f32, y: f32, quantity: f32) -> bool {
        let (x, y) = (
            x.rem_euclid(self.config.world_width),
            y.rem_euclid(self.config.world_height),
        );
        let position = Vec2::new(x, y);
        let id = FoodId(self.next_food_id);
        let source = FoodSource::new(id, position, self.config.food_radius, quantity);
        if !self.food.insert(source) {
            return false;
        }
        self.next_food_id += 1;
        self.to_food
            .deposit(position, self.config.max_cell_intensity, true);
        true
    }

    /// Mark a permanent colony beacon on the home field.
    ///
    /// Hosts call this once per colony at setup so carriers can lock onto
    /// home from within sensing range even before any trail exists.
    pub fn mark_colony(&mut self, x: f32, y: f32) {
        let (x, y) = (
            x.rem_euclid(self.config.world_width),
            y.rem_euclid(self.config.world_height),
        );
        self.to_home
            .deposit(Vec2::new(x, y), self.config.max_cell_intensity, true);
    }

    /// Spawn an ant at `(x, y)` with the given heading.
    ///
    /// The spawn point doubles as the ant's colony anchor. The ant's
    /// private RNG is split from the world RNG here, which is what keeps
    /// the parallel update phase reproducible for a fixed seed.
    pub fn place_ant(&mut self, x: f32, y: f32, heading: f32) -> AntId {
        let (x, y) = (
            x.rem_euclid(self.config.world_width),
            y.rem_euclid(self.config.world_height),
        );
        let ant_rng = SmallRng::seed_from_u64(self.rng.gen());
        let ant = Ant::spawn(Vec2::new(x, y), heading, &self.config, ant_rng);
        self.ants.insert(ant)
    }

    /// Spawn an ant with a uniformly random heading.
    pub fn place_ant_random_heading(&mut self, x: f32, y: f32) -> AntId {
        let heading = self.rng.gen_range(0.0..FULL_TURN);
        self.place_ant(x, y, heading)
    }

    /// Execute one simulation tick.
    ///
    /// Stage order: field decay, parallel ant fan-out, serial effect
    /// commit, depleted-food sweep, summary. Each stage is a barrier; the
    /// next one never observes a partially applied predecessor.
    pub fn step(&mut self, dt: f32) -> TickEvents {
        let next_tick = self.tick.next();

        self.stage_decay(dt);
        let effects = self.stage_ants(dt);
        let (pickups, deliveries) = self.stage_commit(effects);
        let depleted = self.stage_food_sweep();

        self.tick = next_tick;
        let summary = TickSummary {
            tick: self.tick,
            ant_count: self.ants.len(),
            food_count: self.food.len(),
            pickups,
            deliveries,
            depleted,
            total_intensity: self.to_food.total_intensity() + self.to_home.total_intensity(),
        };
        if self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(summary);

        TickEvents {
            tick: self.tick,
            pickups,
            deliveries,
            depleted,
        }
    }

    fn stage_decay(&mut self, dt: f32) {
        let to_food = &mut self.to_food;
        let to_home = &mut self.to_home;
        self.pool.install(move || {
            rayon::join(|| to_food.decay(dt), || to_home.decay(dt));
        });
    }

    fn stage_ants(&mut self, dt: f32) -> Vec<AntEffects> {
        if self.ants.is_empty() {
            return Vec::new();
        }
        let view = TickView {
            config: &self.config,
            to_food: &self.to_food,
            to_home: &self.to_home,
            food: &self.food,
        };
        let rows = self.ants.rows_mut();
        self.pool.install(|| {
            rows.par_iter_mut()
                .map(|ant| ant.update(dt, &view))
                .collect()
        })
    }

    fn stage_commit(&mut self, effects: Vec<AntEffects>) -> (u32, u32) {
        let mut pickups = 0;
        let mut deliveries = 0;
        for effect in effects {
            if effect.delivered {
                deliveries += 1;
            }
            if let Some(deposit) = effect.deposit {
                let field = match deposit.channel {
                    Channel::ToFood => &mut self.to_food,
                    Channel::ToHome => &mut self.to_home,
                };
                field.deposit(deposit.position, deposit.amount, false);
            }
            if let Some(intent) = effect.pick {
                let found =
                    self.food
                        .find_neighbor_mut(intent.position.x, intent.position.y, |food| {
                            food.id() == intent.id
                        });
                // A same-tick contender may have drained the source
                // already; the losing pick is a no-op.
                if let Some(food) = found {
                    if food.pick() {
                        pickups += 1;
                    }
                }
            }
        }
        (pickups, deliveries)
    }

    fn stage_food_sweep(&mut self) -> u32 {
        let removed = self.food.drain_where(|food| food.is_done());
        for food in &removed {
            self.to_food.clear_permanent(food.position());
            debug!(
                x = food.position().x,
                y = food.position().y,
                "food source depleted"
            );
        }
        removed.len() as u32
    }

    /// Snapshot one pheromone field for overlay rendering.
    #[must_use]
    pub fn field_snapshot(&self, channel: Channel) -> FieldSnapshot {
        self.field(channel).snapshot()
    }

    /// Snapshot all live food sources.
    #[must_use]
    pub fn food_snapshot(&self) -> Vec<FoodSnapshot> {
        self.food
            .iter()
            .map(|food| FoodSnapshot {
                position: food.position(),
                radius: food.radius(),
                quantity: food.quantity(),
            })
            .collect()
    }

    /// Snapshot all live ants.
    #[must_use]
    pub fn ant_snapshot(&self) -> Vec<AntSnapshot> {
        self.ants
            .rows()
            .iter()
            .map(|ant| AntSnapshot {
                position: ant.position(),
                heading: ant.heading(),
                phase: ant.phase(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ForagerConfig {
        ForagerConfig {
            world_width: 100.0,
            world_height: 100.0,
            pheromone_cell_size: 1.0,
            food_cell_size: 5.0,
            rng_seed: Some(7),
            worker_threads: 1,
            ..ForagerConfig::default()
        }
    }

    fn test_field(max_intensity: f32, decay_rate: f32, residual: f32) -> PheromoneField {
        let geometry = GridGeometry::new(100.0, 100.0, 1.0).expect("geometry");
        PheromoneField::new(geometry, max_intensity, decay_rate, residual)
    }

    #[test]
    fn deposit_clamps_transient_cells() {
        let mut field = test_field(100.0, 1.0, 50.0);
        let at = Vec2::new(10.5, 10.5);
        field.deposit(at, 80.0, false);
        field.deposit(at, 80.0, false);
        let cell = field.query(at, (0, 0));
        assert!((cell.intensity - 100.0).abs() < f32::EPSILON);
        assert_eq!(cell.permanent, 0);
    }

    #[test]
    fn permanent_deposits_are_unbounded() {
        let mut field = test_field(100.0, 1.0, 50.0);
        let at = Vec2::new(3.0, 3.0);
        field.deposit(at, 500.0, true);
        field.deposit(at, 500.0, false);
        let cell = field.query(at, (0, 0));
        assert!((cell.intensity - 1000.0).abs() < f32::EPSILON);
        assert_eq!(cell.permanent, 1);
    }

    #[test]
    fn decay_floors_at_zero_and_spares_permanent_cells() {
        let mut field = test_field(100.0, 1.0, 50.0);
        let transient = Vec2::new(1.0, 1.0);
        let beacon = Vec2::new(5.0, 5.0);
        field.deposit(transient, 2.5, false);
        field.deposit(beacon, 10.0, true);

        field.decay(2.0);
        assert!((field.query(transient, (0, 0)).intensity - 0.5).abs() < 1e-5);
        assert!((field.query(beacon, (0, 0)).intensity - 10.0).abs() < f32::EPSILON);

        // Idempotent at the floor.
        field.decay(10.0);
        field.decay(10.0);
        assert_eq!(field.query(transient, (0, 0)).intensity, 0.0);
        assert!((field.query(beacon, (0, 0)).intensity - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decay_with_zero_dt_is_a_no_op() {
        let mut field = test_field(100.0, 1.0, 50.0);
        field.deposit(Vec2::new(1.0, 1.0), 5.0, false);
        field.decay(0.0);
        assert!((field.query(Vec2::new(1.0, 1.0), (0, 0)).intensity - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn clear_permanent_restores_decay_with_residual() {
        let mut field = test_field(100.0, 1.0, 50.0);
        let at = Vec2::new(8.0, 8.0);
        field.deposit(at, 400.0, true);
        field.deposit(at, 400.0, true);

        field.clear_permanent(at);
        let cell = field.query(at, (0, 0));
        assert_eq!(cell.permanent, 1, "one level of permanence remains");
        assert!((cell.intensity - 800.0).abs() < f32::EPSILON);

        field.clear_permanent(at);
        let cell = field.query(at, (0, 0));
        assert_eq!(cell.permanent, 0);
        assert!((cell.intensity - 50.0).abs() < f32::EPSILON, "residual clamp");

        // Further clears are no-ops.
        field.clear_permanent(at);
        assert_eq!(field.query(at, (0, 0)).permanent, 0);
    }

    #[test]
    fn query_offset_wraps_toroidally() {
        let mut field = test_field(100.0, 1.0, 50.0);
        field.deposit(Vec2::new(99.5, 0.5), 7.0, false);
        let cell = field.query(Vec2::new(0.5, 0.5), (-1, 0));
        assert!((cell.intensity - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn phase_transitions() {
        assert_eq!(
            Phase::SeekingFood.on_food_contact(),
            Some(Phase::ReturningHome)
        );
        assert_eq!(Phase::ReturningHome.on_food_contact(), None);
        assert_eq!(
            Phase::ReturningHome.on_colony_contact(),
            Some(Phase::SeekingFood)
        );
        assert_eq!(Phase::SeekingFood.on_colony_contact(), None);
    }

    #[test]
    fn trail_channel_is_opposite_of_sense_channel() {
        for phase in [Phase::SeekingFood, Phase::ReturningHome] {
            assert_ne!(phase.sense_channel(), phase.trail_channel());
        }
        assert_eq!(Phase::SeekingFood.sense_channel(), Channel::ToFood);
        assert_eq!(Phase::SeekingFood.trail_channel(), Channel::ToHome);
    }

    #[test]
    fn food_pick_depletes_exactly_once() {
        let mut food = FoodSource::new(FoodId(0), Vec2::new(1.0, 1.0), 4.0, 1.0);
        assert!(!food.is_done());
        assert!(food.pick());
        assert!(food.is_done());
        assert!(!food.pick(), "depleted source yields nothing");
        assert!((food.quantity() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn config_validation_rejects_degenerate_values() {
        let bad = ForagerConfig {
            pheromone_cell_size: 0.0,
            ..ForagerConfig::default()
        };
        assert!(World::new(bad).is_err());

        let bad = ForagerConfig {
            world_width: -5.0,
            ..ForagerConfig::default()
        };
        assert!(World::new(bad).is_err());

        let bad = ForagerConfig {
            max_per_cell: 0,
            ..ForagerConfig::default()
        };
        assert!(World::new(bad).is_err());

        let bad = ForagerConfig {
            reserve_decay: 1.5,
            ..ForagerConfig::default()
        };
        assert!(World::new(bad).is_err());
    }

    #[test]
    fn world_rejects_extent_smaller_than_one_cell() {
        let bad = ForagerConfig {
            world_width: 1.0,
            pheromone_cell_size: 2.0,
            ..ForagerConfig::default()
        };
        assert!(World::new(bad).is_err());
    }

    #[test]
    fn place_food_marks_permanent_beacon() {
        let mut world = World::new(small_config()).expect("world");
        assert!(world.place_food(50.0, 50.0, 3.0));
        assert_eq!(world.food_count(), 1);
        let cell = world
            .field(Channel::ToFood)
            .query(Vec2::new(50.0, 50.0), (0, 0));
        assert_eq!(cell.permanent, 1);
        let cell = world
            .field(Channel::ToHome)
            .query(Vec2::new(50.0, 50.0), (0, 0));
        assert_eq!(cell.permanent, 0, "home field untouched by food placement");
    }

    #[test]
    fn place_food_respects_bucket_capacity() {
        let config = ForagerConfig {
            max_per_cell: 1,
            ..small_config()
        };
        let mut world = World::new(config).expect("world");
        assert!(world.place_food(12.0, 12.0, 3.0));
        assert!(!world.place_food(13.0, 13.0, 3.0), "same bucket is full");
        assert_eq!(world.food_count(), 1);
        // The rejected placement must not have left a beacon behind.
        let cell = world
            .field(Channel::ToFood)
            .query(Vec2::new(13.0, 13.0), (0, 0));
        assert_eq!(cell.permanent, 0);
    }

    #[test]
    fn ant_arena_handles_are_stable_across_removal() {
        let mut world = World::new(small_config()).expect("world");
        let a = world.place_ant(10.0, 10.0, 0.0);
        let b = world.place_ant(20.0, 20.0, 1.0);
        let c = world.place_ant(30.0, 30.0, 2.0);
        assert_eq!(world.ant_count(), 3);

        // Direct arena surgery is a host-reset affordance, not a tick path.
        let removed = world.ants.remove(b).expect("removed");
        assert!((removed.position().x - 20.0).abs() < f32::EPSILON);
        assert!(world.ants.contains(a));
        assert!(world.ants.contains(c));
        assert!(!world.ants.contains(b));
        assert!((world.ants.get(c).expect("c").position().x - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reserve_decays_multiplicatively_and_respects_floor() {
        let config = small_config();
        let mut ant = Ant::spawn(
            Vec2::new(50.0, 50.0),
            0.0,
            &config,
            SmallRng::seed_from_u64(1),
        );
        let before = ant.reserve();
        let mut effects = AntEffects::default();
        ant.lay_trail(&config, &mut effects);
        let deposit = effects.deposit.expect("deposit");
        assert!((deposit.amount - before * config.deposit_fraction).abs() < 1e-3);
        assert!((ant.reserve() - before * config.reserve_decay).abs() < 1e-3);
        assert_eq!(deposit.channel, Channel::ToHome, "seeker lays home trail");

        // Below the floor nothing is laid.
        ant.reserve = config.reserve_floor * 0.5;
        let mut effects = AntEffects::default();
        ant.lay_trail(&config, &mut effects);
        assert!(effects.deposit.is_none());
    }

    #[test]
    fn food_contact_flips_phase_and_reverses_heading() {
        let config = small_config();
        let mut world = World::new(config.clone()).expect("world");
        assert!(world.place_food(52.0, 50.0, 2.0));

        let mut ant = Ant::spawn(
            Vec2::new(50.0, 50.0),
            0.75,
            &config,
            SmallRng::seed_from_u64(5),
        );
        ant.reserve = 10.0;
        let view = TickView {
            config: &config,
            to_food: &world.to_food,
            to_home: &world.to_home,
            food: &world.food,
        };
        let mut effects = AntEffects::default();
        ant.check_food(&view, &mut effects);

        assert_eq!(ant.phase(), Phase::ReturningHome);
        assert!((ant.heading() - (0.75 + HALF_TURN)).abs() < 1e-6);
        assert!((ant.reserve() - config.max_reserve).abs() < f32::EPSILON);
        let intent = effects.pick.expect("pick requested");
        assert_eq!(intent.position, Vec2::new(52.0, 50.0));

        // A carrier brushing another source does not react.
        let mut effects = AntEffects::default();
        ant.check_food(&view, &mut effects);
        assert!(effects.pick.is_none());
        assert_eq!(ant.phase(), Phase::ReturningHome);
    }

    #[test]
    fn steering_short_circuits_to_permanent_beacon() {
        let config = small_config();
        let mut world = World::new(config.clone()).expect("world");
        assert!(world.place_food(55.0, 50.0, 5.0));

        let mut ant = Ant::spawn(
            Vec2::new(50.0, 50.0),
            0.0,
            &config,
            SmallRng::seed_from_u64(2),
        );
        let view = TickView {
            config: &config,
            to_food: &world.to_food,
            to_home: &world.to_home,
            food: &world.food,
        };
        ant.steer(&view);
        // Beacon cell center is (55.5, 50.5); heading must aim at it.
        let expected = (Vec2::new(55.5, 50.5) - Vec2::new(50.0, 50.0)).angle();
        assert!((ant.heading() - expected).abs() < 1e-4);
    }

    #[test]
    fn steering_without_signal_keeps_heading() {
        let config = small_config();
        let world = World::new(config.clone()).expect("world");
        let mut ant = Ant::spawn(
            Vec2::new(50.0, 50.0),
            1.25,
            &config,
            SmallRng::seed_from_u64(3),
        );
        let view = TickView {
            config: &config,
            to_food: &world.to_food,
            to_home: &world.to_home,
            food: &world.food,
        };
        ant.steer(&view);
        assert!((ant.heading() - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn movement_wraps_at_world_bounds() {
        let config = small_config();
        let mut ant = Ant::spawn(
            Vec2::new(99.5, 50.0),
            0.0,
            &config,
            SmallRng::seed_from_u64(4),
        );
        ant.advance(0.02, &config); // one unit forward at speed 50
        assert!(ant.position().x < 1.0, "crossed the seam");
        assert!((ant.position().y - 50.0).abs() < f32::EPSILON);
    }
}
