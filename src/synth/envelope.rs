use super::MIN_TIME;

/*
Linear ADSR
===========

  level
    1.0 ┐    ╱╲
        │   ╱  ╲________
    S   │  ╱            ╲
    0.0 └─╱──────────────╲──→ t
          A   D    S      R

Per-sample steps come from the stage time:

    step = change / (seconds * sample_rate)

Gate on restarts the attack from zero. Gate off starts the release from the
current level, whatever the stage, so a note shorter than its attack still
fades out instead of clicking.

Release is interpolated over a sample count fixed at gate-off time so it
lands on exactly zero.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,

    stage: Stage,
    level: f32,

    release_from: f32,
    release_total: u32,
    release_elapsed: u32,
}

impl Envelope {
    /// Times in seconds, sustain as a level in [0, 1].
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(MIN_TIME),
            stage: Stage::Idle,
            level: 0.0,
            release_from: 0.0,
            release_total: 1,
            release_elapsed: 0,
        }
    }

    pub fn gate_on(&mut self) {
        self.level = 0.0;
        self.release_elapsed = 0;
        self.stage = Stage::Attack;
    }

    pub fn gate_off(&mut self, sample_rate: f32) {
        if self.stage == Stage::Idle {
            return;
        }
        self.release_from = self.level;
        self.release_total = (self.release * sample_rate).round().max(1.0) as u32;
        self.release_elapsed = 0;
        self.stage = Stage::Release;
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        match self.stage {
            Stage::Idle => self.level = 0.0,
            Stage::Attack => {
                self.level += 1.0 / (self.attack * sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.level -= (1.0 - self.sustain) / (self.decay * sample_rate);
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = Stage::Sustain;
                }
            }
            Stage::Sustain => self.level = self.sustain,
            Stage::Release => {
                let progress = self.release_elapsed as f32 / self.release_total as f32;
                self.level = (self.release_from * (1.0 - progress)).max(0.0);
                self.release_elapsed = self.release_elapsed.saturating_add(1);
                if self.release_elapsed >= self.release_total {
                    self.level = 0.0;
                    self.stage = Stage::Idle;
                }
            }
        }
        self.level
    }

    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = Stage::Idle;
        self.level = 0.0;
        self.release_elapsed = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn run(env: &mut Envelope, samples: usize) {
        for _ in 0..samples {
            env.next_sample(SAMPLE_RATE);
        }
    }

    #[test]
    fn attack_then_sustain() {
        let mut env = Envelope::adsr(0.01, 0.05, 0.6, 0.2);
        env.gate_on();
        run(&mut env, 11);
        assert!(env.level() > 0.99);
        assert_ne!(env.stage(), Stage::Attack);

        run(&mut env, 60);
        assert_eq!(env.stage(), Stage::Sustain);
        assert!((env.level() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn release_from_mid_attack_reaches_idle() {
        let mut env = Envelope::adsr(0.1, 0.05, 0.5, 0.03);
        env.gate_on();
        run(&mut env, 20);
        let before = env.level();
        assert!(before > 0.0 && before < 1.0);

        env.gate_off(SAMPLE_RATE);
        run(&mut env, 30);
        assert_eq!(env.stage(), Stage::Idle);
        assert_eq!(env.level(), 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn gate_off_while_idle_is_ignored() {
        let mut env = Envelope::adsr(0.01, 0.01, 0.5, 0.01);
        env.gate_off(SAMPLE_RATE);
        assert_eq!(env.stage(), Stage::Idle);
    }
}
