//! Fixed-step world: tank agents and a scripted player
//!
//! Each step the player walks its path and attacks the nearest living tank
//! in range, then every tank's controller ticks against a fresh context.
//! Runs are fully determined by the config and its seed.

use crate::agent::{build_controller, TankController};
use crate::config::SimConfig;
use crate::context::TankContext;
use crate::ids::{TankState, TankStimulus};
use npc_fsm::{waypoint, DiagnosticSink, FsmError, FsmResult, TickOutcome, Vec3};
use std::sync::Arc;

/// Something observable that happened during a step
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    Switched {
        tick: u64,
        agent: usize,
        from: TankState,
        to: TankState,
    },
    Hit {
        tick: u64,
        agent: usize,
        damage: f32,
        health_left: f32,
    },
    Rejected {
        tick: u64,
        agent: usize,
        state: TankState,
        error: FsmError<TankState, TankStimulus>,
    },
}

/// End-of-run snapshot of one tank
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSummary {
    pub agent: usize,
    pub state: Option<TankState>,
    pub position: Vec3,
    pub health: f32,
    pub shots_fired: u32,
    pub switches: u32,
}

/// The scripted player tanks react to
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    /// Index of the path point being walked to
    next_point: usize,
    /// Seconds until the next attack
    cooldown: f32,
}

impl Player {
    pub fn new(path: &[Vec3]) -> Self {
        Self {
            position: path.first().copied().unwrap_or(Vec3::ZERO),
            next_point: 0,
            cooldown: 0.0,
        }
    }

    /// Walk the looping path
    fn walk(&mut self, path: &[Vec3], speed: f32, dt: f32) {
        let Some(&target) = path.get(self.next_point) else {
            return;
        };
        self.position = self.position.move_towards(target, speed * dt);
        if self.position == target {
            self.next_point = (self.next_point + 1) % path.len();
        }
    }

    /// Count down the attack timer. Returns true when an attack is due.
    fn ready(&mut self, dt: f32) -> bool {
        self.cooldown -= dt;
        self.cooldown <= 0.0
    }
}

struct Agent<'w> {
    controller: TankController<'w>,
    ctx: TankContext,
    switches: u32,
}

pub struct World<'w> {
    config: &'w SimConfig,
    agents: Vec<Agent<'w>>,
    player: Player,
    tick: u64,
}

impl<'w> World<'w> {
    /// Spawn `config.sim.agents` tanks round-robin on the waypoints.
    ///
    /// Agent `i` is seeded with `seed + i`.
    pub fn new(
        config: &'w SimConfig,
        sink: Arc<dyn DiagnosticSink>,
    ) -> FsmResult<Self, TankState, TankStimulus> {
        let waypoints = &config.waypoints;
        let mut agents = Vec::with_capacity(config.sim.agents);

        for i in 0..config.sim.agents {
            let spawn = if waypoints.is_empty() {
                Vec3::ZERO
            } else {
                waypoints[i % waypoints.len()]
            };
            let mut ctx = TankContext::new(spawn, config.npc.max_health);
            ctx.agent.delta_time = config.sim.delta_time;

            let seed = config.sim.seed.wrapping_add(i as u64);
            let controller = build_controller(config, seed, sink.clone(), &ctx)?;
            agents.push(Agent {
                controller,
                ctx,
                switches: 0,
            });
        }

        log::info!(
            "World ready: {} agents, {} waypoints, seed {}",
            agents.len(),
            waypoints.len(),
            config.sim.seed
        );

        Ok(Self {
            config,
            agents,
            player: Player::new(&config.player.path),
            tick: 0,
        })
    }

    /// Steps taken so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Get the scripted player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Number of tanks
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Get a tank's context
    pub fn agent_context(&self, agent: usize) -> Option<&TankContext> {
        self.agents.get(agent).map(|a| &a.ctx)
    }

    /// Get a tank's current state
    pub fn agent_state(&self, agent: usize) -> Option<TankState> {
        self.agents.get(agent).and_then(|a| a.controller.current_state_id())
    }

    /// Advance one fixed step
    pub fn step(&mut self) -> Vec<WorldEvent> {
        self.tick += 1;
        let config = self.config;
        let dt = config.sim.delta_time;
        let mut events = Vec::new();

        self.player.walk(&config.player.path, config.player.speed, dt);
        if self.player.ready(dt) {
            if let Some(event) = self.player_attack() {
                events.push(event);
            }
        }

        let tick = self.tick;
        for (index, agent) in self.agents.iter_mut().enumerate() {
            agent.ctx.agent.delta_time = dt;
            agent.ctx.agent.target = Some(self.player.position);

            match agent.controller.tick(&mut agent.ctx) {
                TickOutcome::Switched { from, to } => {
                    agent.switches += 1;
                    log::debug!("Agent {} {} -> {} at tick {}", index, from, to, tick);
                    events.push(WorldEvent::Switched {
                        tick,
                        agent: index,
                        from,
                        to,
                    });
                }
                TickOutcome::Rejected { current, error } => events.push(WorldEvent::Rejected {
                    tick,
                    agent: index,
                    state: current,
                    error,
                }),
                TickOutcome::Stayed(_) | TickOutcome::Uninitialized => {}
            }
        }

        events
    }

    /// Hit the nearest living tank within range
    fn player_attack(&mut self) -> Option<WorldEvent> {
        let living: Vec<usize> = (0..self.agents.len())
            .filter(|&i| !self.agents[i].ctx.is_dead())
            .collect();
        let positions: Vec<Vec3> = living.iter().map(|&i| self.agents[i].ctx.agent.position).collect();

        let nearest = waypoint::nearest_index(self.player.position, &positions).ok()?;
        if self.player.position.distance(positions[nearest]) > self.config.player.attack_range {
            return None;
        }

        let agent = living[nearest];
        let damage = self.config.player.attack_damage;
        let health_left = self.agents[agent].ctx.take_damage(damage);
        self.player.cooldown = self.config.player.attack_interval;

        log::debug!("Player hit agent {} for {} ({} left)", agent, damage, health_left);
        Some(WorldEvent::Hit {
            tick: self.tick,
            agent,
            damage,
            health_left,
        })
    }

    /// Run `ticks` steps and summarize every agent.
    ///
    /// Rejected decisions have already gone to the diagnostic sink.
    pub fn run(&mut self, ticks: u64) -> Vec<AgentSummary> {
        for _ in 0..ticks {
            self.step();
        }
        self.summary()
    }

    /// Snapshot of every agent
    pub fn summary(&self) -> Vec<AgentSummary> {
        self.agents
            .iter()
            .enumerate()
            .map(|(index, agent)| AgentSummary {
                agent: index,
                state: agent.controller.current_state_id(),
                position: agent.ctx.agent.position,
                health: agent.ctx.health,
                shots_fired: agent.ctx.shots_fired,
                switches: agent.switches,
            })
            .collect()
    }
}
