//! Module providing the `Scene` trait and the two demo stages.
//!
//! A scene owns whatever GPU objects it draws with. Only one scene is alive at a time; switching
//! stages drops the old scene (and with it its GPU objects) once the new one is built.

use sdl2::keyboard::Keycode;
use serde::{Deserialize, Serialize};

use crate::other::UpdateContext;

pub mod clear;
pub mod triangle;

/// The demo stages, in the order they were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// A window cleared to a solid color.
    Clear,
    /// An animated triangle over an animated background.
    Triangle,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Clear => "clear",
            Stage::Triangle => "triangle",
        }
    }

    /// The other stage.
    pub fn toggled(self) -> Self {
        match self {
            Stage::Clear => Stage::Triangle,
            Stage::Triangle => Stage::Clear,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" | "1" => Ok(Stage::Clear),
            "triangle" | "2" => Ok(Stage::Triangle),
            _ => Err(format!("Unknown stage '{s}', expected 'clear' or 'triangle'")),
        }
    }
}

/// What a scene asks the [`SceneManager`] to do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSwitch {
    None,
    /// Replace the current scene with a fresh scene of the given stage.
    Replace(Stage),
    Quit,
}

/// Actions bound to keys in every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleStage,
    Restart,
}

impl KeyAction {
    pub fn from_keycode(keycode: Keycode) -> Option<Self> {
        match keycode {
            Keycode::Escape => Some(KeyAction::Quit),
            Keycode::Tab => Some(KeyAction::ToggleStage),
            Keycode::R => Some(KeyAction::Restart),
            _ => None,
        }
    }
}

/// Key handling shared by the stages. Remembers the last bound key pressed until the next
/// update.
#[derive(Debug, Default)]
pub struct Controls {
    pending: Option<KeyAction>,
}

impl Controls {
    pub fn handle_event(&mut self, event: &sdl2::event::Event) {
        if let sdl2::event::Event::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } = event
        {
            self.press(*keycode);
        }
    }

    pub fn press(&mut self, keycode: Keycode) {
        if let Some(action) = KeyAction::from_keycode(keycode) {
            self.pending = Some(action);
        }
    }

    /// Turns the pending action, if any, into a switch away from `current`.
    pub fn take_switch(&mut self, current: Stage) -> SceneSwitch {
        match self.pending.take() {
            None => SceneSwitch::None,
            Some(KeyAction::Quit) => SceneSwitch::Quit,
            Some(KeyAction::ToggleStage) => SceneSwitch::Replace(current.toggled()),
            Some(KeyAction::Restart) => SceneSwitch::Replace(current),
        }
    }
}

/// The Scene trait defines the common interface for the demo stages.
pub trait Scene {
    /// The stage this scene implements.
    fn stage(&self) -> Stage;

    /// Handles an event.
    fn handle_event(&mut self, _event: &sdl2::event::Event) {}

    /// Advances the scene by one frame.
    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        SceneSwitch::None
    }

    /// Renders the scene.
    fn render(&mut self, gl: &glow::Context);
}

/// Builds the scene for a stage.
pub type SceneFactory = Box<dyn FnMut(Stage) -> Box<dyn Scene>>;

/// Owns the active scene and replaces it when asked to.
pub struct SceneManager {
    current: Box<dyn Scene>,
    factory: SceneFactory,
}

impl SceneManager {
    /// Creates a new SceneManager showing `initial`.
    pub fn new(initial: Stage, mut factory: SceneFactory) -> Self {
        log::info!("Starting {initial} stage");
        let current = factory(initial);
        Self { current, factory }
    }

    /// The stage currently shown.
    pub fn stage(&self) -> Stage {
        self.current.stage()
    }

    /// Handles an event by passing it to the current scene.
    pub fn handle_event(&mut self, event: &sdl2::event::Event) {
        self.current.handle_event(event);
    }

    /// Updates the current scene and applies the switch it returns. Returns `false` once the
    /// scene asked to quit.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        if ctx.is_slow() {
            log::debug!("Slow frame in {} stage: {:.0} ms", self.stage(), ctx.delta_time * 1000.0);
        }
        match self.current.update(ctx) {
            SceneSwitch::None => {}
            SceneSwitch::Replace(stage) => {
                if stage == self.current.stage() {
                    log::info!("Restarting {stage} stage");
                } else {
                    log::info!("Switching from {} to {stage} stage", self.current.stage());
                }
                self.current = (self.factory)(stage);
            }
            SceneSwitch::Quit => {
                log::info!("Quit requested from {} stage", self.current.stage());
                return false;
            }
        }
        true
    }

    /// Renders the current scene.
    pub fn render(&mut self, gl: &glow::Context) {
        self.current.render(gl);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct StubScene {
        stage: Stage,
        controls: Controls,
        updates: Rc<RefCell<u32>>,
    }

    impl Scene for StubScene {
        fn stage(&self) -> Stage {
            self.stage
        }

        fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
            *self.updates.borrow_mut() += 1;
            self.controls.take_switch(self.stage)
        }

        fn render(&mut self, _gl: &glow::Context) {}
    }

    fn stub_manager(initial: Stage, built: Rc<RefCell<Vec<Stage>>>) -> SceneManager {
        SceneManager::new(
            initial,
            Box::new(move |stage| {
                built.borrow_mut().push(stage);
                Box::new(StubScene {
                    stage,
                    controls: Controls::default(),
                    updates: Rc::new(RefCell::new(0)),
                })
            }),
        )
    }

    #[test]
    fn test_stage_parsing() {
        assert_eq!("clear".parse::<Stage>(), Ok(Stage::Clear));
        assert_eq!("Triangle".parse::<Stage>(), Ok(Stage::Triangle));
        assert_eq!("2".parse::<Stage>(), Ok(Stage::Triangle));
        assert!("square".parse::<Stage>().is_err());
        assert_eq!(Stage::Clear.toggled(), Stage::Triangle);
        assert_eq!(Stage::Triangle.to_string(), "triangle");
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(KeyAction::from_keycode(Keycode::Escape), Some(KeyAction::Quit));
        assert_eq!(KeyAction::from_keycode(Keycode::Tab), Some(KeyAction::ToggleStage));
        assert_eq!(KeyAction::from_keycode(Keycode::R), Some(KeyAction::Restart));
        assert_eq!(KeyAction::from_keycode(Keycode::Space), None);
    }

    #[test]
    fn test_controls_switch_once() {
        let mut controls = Controls::default();
        assert_eq!(controls.take_switch(Stage::Clear), SceneSwitch::None);

        controls.press(Keycode::Tab);
        assert_eq!(
            controls.take_switch(Stage::Clear),
            SceneSwitch::Replace(Stage::Triangle)
        );
        assert_eq!(controls.take_switch(Stage::Clear), SceneSwitch::None);

        controls.press(Keycode::A);
        controls.press(Keycode::R);
        assert_eq!(
            controls.take_switch(Stage::Triangle),
            SceneSwitch::Replace(Stage::Triangle)
        );

        controls.press(Keycode::Escape);
        assert_eq!(controls.take_switch(Stage::Triangle), SceneSwitch::Quit);
    }

    #[test]
    fn test_manager_without_switch_keeps_scene() {
        let built = Rc::new(RefCell::new(Vec::new()));
        let mut manager = stub_manager(Stage::Clear, Rc::clone(&built));
        let ctx = UpdateContext::new(0.016);
        for _ in 0..5 {
            assert!(manager.update(&ctx));
        }
        assert_eq!(manager.stage(), Stage::Clear);
        assert_eq!(*built.borrow(), [Stage::Clear]);
    }

    #[test]
    fn test_manager_restart_builds_fresh_scene() {
        let built = Rc::new(RefCell::new(Vec::new()));
        let factory_built = Rc::clone(&built);
        let mut manager = SceneManager::new(
            Stage::Triangle,
            Box::new(move |stage| {
                factory_built.borrow_mut().push(stage);
                let mut controls = Controls::default();
                // Only the first scene restarts.
                if factory_built.borrow().len() == 1 {
                    controls.press(Keycode::R);
                }
                Box::new(StubScene {
                    stage,
                    controls,
                    updates: Rc::new(RefCell::new(0)),
                })
            }),
        );
        let ctx = UpdateContext::new(0.016);

        assert!(manager.update(&ctx));
        assert_eq!(manager.stage(), Stage::Triangle);
        assert!(manager.update(&ctx));
        assert_eq!(*built.borrow(), [Stage::Triangle, Stage::Triangle]);
    }

    #[test]
    fn test_manager_replaces_and_quits() {
        let updates = Rc::new(RefCell::new(0));
        let built = Rc::new(RefCell::new(Vec::new()));
        let factory_built = Rc::clone(&built);
        let factory_updates = Rc::clone(&updates);
        let mut manager = SceneManager::new(
            Stage::Triangle,
            Box::new(move |stage| {
                factory_built.borrow_mut().push(stage);
                let mut controls = Controls::default();
                // Every scene asks to move on right away; the clear stage quits.
                controls.press(match stage {
                    Stage::Triangle => Keycode::Tab,
                    Stage::Clear => Keycode::Escape,
                });
                Box::new(StubScene {
                    stage,
                    controls,
                    updates: Rc::clone(&factory_updates),
                })
            }),
        );
        let ctx = UpdateContext::new(0.016);

        assert!(manager.update(&ctx));
        assert_eq!(manager.stage(), Stage::Clear);
        assert!(!manager.update(&ctx));
        assert_eq!(*built.borrow(), [Stage::Triangle, Stage::Clear]);
        assert_eq!(*updates.borrow(), 2);
    }
}
