//! Binding engine — maps conditions to actions every tick.
//!
//! An [`Engine`] is an ordered, immutable table of [`Binding`]s built once at
//! startup. [`Engine::evaluate`] checks every condition against the client
//! set and composes the actions of the matching bindings into one
//! [`Action`] whose legs run concurrently.

use wifitriggers_domain::client_set::ClientSet;
use wifitriggers_domain::condition::Condition;

use crate::action::Action;

/// "When `condition` holds at tick time, run `action`."
#[derive(Debug, Clone)]
pub struct Binding {
    condition: Condition,
    action: Action,
}

impl Binding {
    #[must_use]
    pub fn new(condition: Condition, action: Action) -> Self {
        Self { condition, action }
    }

    #[must_use]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }
}

/// Accumulates bindings in order.
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    bindings: Vec<Binding>,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding.
    #[must_use]
    pub fn bind(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Append a binding built from its parts.
    #[must_use]
    pub fn when(self, condition: Condition, action: Action) -> Self {
        self.bind(Binding::new(condition, action))
    }

    /// Append every binding of `other`, after this builder's own.
    #[must_use]
    pub fn extend(mut self, other: Self) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            bindings: self.bindings,
        }
    }
}

/// Immutable binding table, safe to evaluate from several tasks.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    bindings: Vec<Binding>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Bindings whose condition holds for `clients`, in table order.
    pub fn matching<'a>(&'a self, clients: &'a ClientSet) -> impl Iterator<Item = &'a Binding> {
        self.bindings
            .iter()
            .filter(move |binding| binding.condition.evaluate(clients))
    }

    /// Compose the actions of every matching binding.
    ///
    /// Bindings that do not match contribute [`Action::noop`]; the result is
    /// the no-op action when nothing matches.
    #[must_use]
    pub fn evaluate(&self, clients: &ClientSet) -> Action {
        self.matching(clients).fold(Action::noop(), |composed, binding| {
            tracing::debug!(
                condition = %binding.condition,
                actions = ?binding.action,
                "binding matched"
            );
            composed.and(binding.action.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use wifitriggers_domain::hardware_address::HardwareAddress;

    use super::*;

    fn addr(last: u8) -> HardwareAddress {
        HardwareAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, last])
    }

    fn clients(lasts: &[u8]) -> ClientSet {
        lasts.iter().copied().map(addr).collect()
    }

    fn labelled(label: &'static str) -> Action {
        Action::from_fn(label, |_| async { Ok(()) })
    }

    fn sample_engine() -> Engine {
        Engine::builder()
            .when(Condition::any_present([addr(1)]), labelled("home"))
            .when(!Condition::any_present([addr(1)]), labelled("away"))
            .when(Condition::all_present([addr(2), addr(3)]), labelled("all"))
            .when(Condition::Always, labelled("always"))
            .build()
    }

    #[test]
    fn should_include_exactly_matching_bindings() {
        let engine = sample_engine();

        let action = engine.evaluate(&clients(&[1, 2]));
        assert_eq!(action.labels().collect::<Vec<_>>(), ["home", "always"]);

        let action = engine.evaluate(&clients(&[2, 3]));
        assert_eq!(action.labels().collect::<Vec<_>>(), ["away", "all", "always"]);
    }

    #[test]
    fn should_produce_noop_when_nothing_matches() {
        let engine = Engine::builder()
            .when(Condition::Never, labelled("never"))
            .build();
        assert!(engine.evaluate(&clients(&[1])).is_empty());
    }

    #[test]
    fn should_produce_noop_for_empty_engine() {
        let engine = Engine::default();
        assert!(engine.is_empty());
        assert!(engine.evaluate(&clients(&[1])).is_empty());
    }

    #[test]
    fn should_select_same_actions_regardless_of_binding_order() {
        let forward = sample_engine();
        let reversed = {
            let mut bindings: Vec<_> = forward.bindings().cloned().collect();
            bindings.reverse();
            bindings
                .into_iter()
                .fold(Engine::builder(), EngineBuilder::bind)
                .build()
        };

        for set in [clients(&[]), clients(&[1]), clients(&[1, 2, 3]), clients(&[2, 3])] {
            let mut a: Vec<_> = forward.evaluate(&set).labels().map(str::to_owned).collect();
            let mut b: Vec<_> = reversed.evaluate(&set).labels().map(str::to_owned).collect();
            a.sort();
            b.sort();
            assert_eq!(a, b, "on {set}");
        }
    }

    #[test]
    fn should_concatenate_builders_in_order() {
        let first = Engine::builder().when(Condition::Always, labelled("first"));
        let second = Engine::builder().when(Condition::Always, labelled("second"));

        let engine = first.extend(second).build();

        assert_eq!(engine.len(), 2);
        assert_eq!(
            engine.evaluate(&clients(&[])).labels().collect::<Vec<_>>(),
            ["first", "second"]
        );
    }

    #[test]
    fn should_list_matching_bindings() {
        let engine = sample_engine();
        let set = clients(&[1]);
        let conditions: Vec<String> = engine
            .matching(&set)
            .map(|b| b.condition().to_string())
            .collect();
        assert_eq!(conditions, ["any_present(aa:bb:cc:dd:ee:01)", "always"]);
    }
}
