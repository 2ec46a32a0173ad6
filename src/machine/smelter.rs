//! Alloy smelters - the powered machine and its fuel-burning variant
//!
//! Both variants run the same smelting tasks; they differ only in where
//! crafting energy comes from. The standard smelter drains a buffer
//! filled from outside. The primitive smelter burns items from a fuel
//! slot through a combustion source and has no accessible buffer at all.
//!
//! Per-tick order in the primitive machine matters: the burn clock is
//! decremented before fuel selection runs, so a fresh burn never loses or
//! gains a tick against the old one.

use std::ops::Range;

use super::burn::BurnState;
use super::energy::{BufferedEnergySource, CombustionEnergySource, EnergySource};
use super::persist::{keys, CompoundTag, SmelterComponents};
use super::task::SmeltTask;
use super::MachineEvent;
use crate::core::config;
use crate::core::types::MachineId;
use crate::item::fuel::FuelRegistry;
use crate::item::ItemStack;
use crate::recipe::smelting::SmeltingCatalog;
use crate::recipe::Recipe;

/// Fuel slot of the primitive smelter
pub const FUEL_SLOT: usize = 0;
/// Input slots of the primitive smelter
pub const INPUT_SLOTS: Range<usize> = 1..4;
/// Output slot of the primitive smelter
pub const OUTPUT_SLOT: usize = 4;
const SLOT_COUNT: usize = 5;

/// The fuel-burning variant of the alloy smelter
///
/// Instead of an energy buffer it owns a combustion source: while fuel
/// burns, tasks are fed at a fixed rate, and when the fire goes out the
/// machine waits for the fuel slot.
#[derive(Debug, Clone)]
pub struct PrimitiveSmelter {
    id: MachineId,
    slots: Vec<ItemStack>,
    energy: CombustionEnergySource,
    task: Option<SmeltTask>,
    can_act: bool,
}

impl PrimitiveSmelter {
    pub fn new() -> Self {
        Self {
            id: MachineId::new(),
            slots: vec![ItemStack::empty(); SLOT_COUNT],
            energy: CombustionEnergySource::from_config(),
            task: None,
            can_act: true,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Redstone-style enable flag, owned by the host
    pub fn set_can_act(&mut self, can_act: bool) {
        self.can_act = can_act;
    }

    pub fn can_act(&self) -> bool {
        self.can_act
    }

    pub fn slot(&self, index: usize) -> &ItemStack {
        &self.slots[index]
    }

    pub fn set_slot(&mut self, index: usize, stack: ItemStack) {
        self.slots[index] = stack;
    }

    pub fn fuel_slot(&self) -> &ItemStack {
        &self.slots[FUEL_SLOT]
    }

    pub fn input_slots(&self) -> &[ItemStack] {
        &self.slots[INPUT_SLOTS]
    }

    pub fn output_slot(&self) -> &ItemStack {
        &self.slots[OUTPUT_SLOT]
    }

    /// Take everything from the output slot
    pub fn take_output(&mut self) -> ItemStack {
        std::mem::replace(&mut self.slots[OUTPUT_SLOT], ItemStack::empty())
    }

    pub fn task(&self) -> Option<&SmeltTask> {
        self.task.as_ref()
    }

    pub fn is_burning(&self) -> bool {
        self.energy.burn().is_burning()
    }

    /// Fraction of the current burn remaining, in [0, 1]
    pub fn burn_progress(&self) -> f32 {
        self.energy.burn().progress()
    }

    /// Energy-equivalent output while burning, else 0
    pub fn burn_to_energy(&self) -> u32 {
        self.energy.burn_to_energy()
    }

    /// Active means lit and enabled; there is no buffer to consider
    pub fn is_active(&self) -> bool {
        self.can_act && self.is_burning()
    }

    /// Whether new smelting work may start
    ///
    /// Unlike the powered machine this also accepts work on the promise
    /// of unburned fuel sitting in the slot.
    pub fn can_accept_task(&self) -> bool {
        self.energy.stored() > 0 || !self.slots[FUEL_SLOT].is_empty()
    }

    /// Advance the machine one tick
    pub fn tick(&mut self, fuels: &FuelRegistry, recipes: &SmeltingCatalog) -> Vec<MachineEvent> {
        let mut events = Vec::new();

        advance_task(
            &mut self.task,
            &mut self.energy,
            &mut self.slots,
            INPUT_SLOTS,
            OUTPUT_SLOT,
            self.can_act,
            recipes,
            &mut events,
        );

        if self.task.is_none() {
            let accept = self.can_accept_task();
            accept_task(
                &mut self.task,
                &self.slots[INPUT_SLOTS],
                accept,
                recipes,
                &mut events,
            );
        }

        // Tick burn time even if activation has stopped.
        if self.energy.burn().is_burning() {
            self.energy.burn_mut().tick();
            if !self.energy.burn().is_burning() {
                tracing::debug!(machine = ?self.id, "burn ended");
                events.push(MachineEvent::BurnEnded);
            }
        }

        // Only light new fuel when enabled, cold, and work is waiting.
        let has_pending_task = self.task.as_ref().is_some_and(|t| !t.is_completed());
        if self.can_act && !self.is_burning() && has_pending_task {
            self.try_start_burn(fuels, &mut events);
        }

        events
    }

    /// Consume one unit of fuel from the slot and start a burn
    fn try_start_burn(&mut self, fuels: &FuelRegistry, events: &mut Vec<MachineEvent>) {
        let fuel = &self.slots[FUEL_SLOT];
        if fuel.is_empty() {
            return;
        }
        let Some(properties) = fuels.properties(fuel.item()) else {
            return;
        };
        if properties.burn_ticks == 0 {
            return;
        }

        let fuel_item = fuel.item().clone();
        self.energy.burn_mut().ignite(properties.burn_ticks);
        tracing::debug!(
            machine = ?self.id,
            fuel = %fuel_item,
            duration = properties.burn_ticks,
            "burn started"
        );
        events.push(MachineEvent::BurnStarted {
            fuel: fuel_item,
            duration: properties.burn_ticks,
        });

        // Exactly one of: swap in the remainder, or shrink by one.
        if let Some(remainder) = &properties.remainder {
            self.slots[FUEL_SLOT] = ItemStack::new(remainder.clone(), 1);
        } else {
            self.slots[FUEL_SLOT].shrink(1);
        }
    }

    // === PERSISTENCE ===

    /// Write the burn fields into a save tag
    pub fn save_additional(&self, tag: &mut CompoundTag) {
        tag.put_int(keys::BURN_TIME, self.energy.burn().remaining());
        tag.put_int(keys::BURN_DURATION, self.energy.burn().duration());
    }

    /// Read the burn fields from a save tag; missing fields mean cold
    pub fn load_additional(&mut self, tag: &CompoundTag) {
        *self.energy.burn_mut() = BurnState::from_raw(
            tag.get_int(keys::BURN_TIME),
            tag.get_int(keys::BURN_DURATION),
        );
    }

    /// Collect the typed component record; only a lit machine carries one
    pub fn collect_components(&self) -> SmelterComponents {
        if self.is_burning() {
            SmelterComponents {
                burn_time: Some(self.energy.burn().remaining()),
                burn_duration: Some(self.energy.burn().duration()),
            }
        } else {
            SmelterComponents::default()
        }
    }

    /// Apply a typed component record; missing fields mean cold
    pub fn apply_components(&mut self, components: &SmelterComponents) {
        *self.energy.burn_mut() = BurnState::from_raw(
            components.burn_time.unwrap_or(0),
            components.burn_duration.unwrap_or(0),
        );
    }

    /// Strip component-backed fields from a save tag
    pub fn remove_components_from_tag(tag: &mut CompoundTag) {
        tag.remove(keys::BURN_TIME);
        tag.remove(keys::BURN_DURATION);
    }
}

impl Default for PrimitiveSmelter {
    fn default() -> Self {
        Self::new()
    }
}

/// Input slots of the standard smelter
pub const ALLOY_INPUT_SLOTS: Range<usize> = 0..3;
/// Output slot of the standard smelter
pub const ALLOY_OUTPUT_SLOT: usize = 3;
const ALLOY_SLOT_COUNT: usize = 4;

/// The standard, externally powered alloy smelter
#[derive(Debug, Clone)]
pub struct AlloySmelter {
    id: MachineId,
    slots: Vec<ItemStack>,
    energy: BufferedEnergySource,
    task: Option<SmeltTask>,
    can_act: bool,
}

impl AlloySmelter {
    pub fn new() -> Self {
        Self {
            id: MachineId::new(),
            slots: vec![ItemStack::empty(); ALLOY_SLOT_COUNT],
            energy: BufferedEnergySource::new(config::config().alloy_smelter_capacity),
            task: None,
            can_act: true,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn set_can_act(&mut self, can_act: bool) {
        self.can_act = can_act;
    }

    pub fn slot(&self, index: usize) -> &ItemStack {
        &self.slots[index]
    }

    pub fn set_slot(&mut self, index: usize, stack: ItemStack) {
        self.slots[index] = stack;
    }

    pub fn output_slot(&self) -> &ItemStack {
        &self.slots[ALLOY_OUTPUT_SLOT]
    }

    /// Feed energy into the buffer, returning the amount accepted
    pub fn receive_energy(&mut self, amount: u32) -> u32 {
        self.energy.receive(amount)
    }

    pub fn energy_stored(&self) -> u32 {
        self.energy.stored()
    }

    pub fn is_active(&self) -> bool {
        self.can_act && self.task.is_some()
    }

    pub fn can_accept_task(&self) -> bool {
        self.energy.stored() > 0
    }

    /// Advance the machine one tick
    pub fn tick(&mut self, recipes: &SmeltingCatalog) -> Vec<MachineEvent> {
        let mut events = Vec::new();

        advance_task(
            &mut self.task,
            &mut self.energy,
            &mut self.slots,
            ALLOY_INPUT_SLOTS,
            ALLOY_OUTPUT_SLOT,
            self.can_act,
            recipes,
            &mut events,
        );

        if self.task.is_none() {
            let accept = self.can_accept_task();
            accept_task(
                &mut self.task,
                &self.slots[ALLOY_INPUT_SLOTS],
                accept,
                recipes,
                &mut events,
            );
        }

        events
    }
}

impl Default for AlloySmelter {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the current task against whichever energy source the machine has
///
/// Progress pauses while the recipe's inputs are missing. On completion
/// the inputs are consumed and the output delivered, but only once the
/// output slot can take it; until then the finished task waits.
#[allow(clippy::too_many_arguments)]
fn advance_task(
    task_slot: &mut Option<SmeltTask>,
    energy: &mut dyn EnergySource,
    slots: &mut [ItemStack],
    input_slots: Range<usize>,
    output_slot: usize,
    can_act: bool,
    recipes: &SmeltingCatalog,
    events: &mut Vec<MachineEvent>,
) {
    if !can_act {
        return;
    }
    let Some(task) = task_slot.as_mut() else {
        return;
    };
    let Some(recipe) = recipes.get(task.recipe_id()) else {
        // Unknown recipe (catalog changed underneath us), drop the task
        tracing::warn!(recipe = task.recipe_id(), "dropping task for unknown recipe");
        *task_slot = None;
        return;
    };

    if !task.is_completed() {
        if !recipe.matches(&slots[input_slots.clone()]) {
            return;
        }
        task.advance(energy, config::config().smelter_max_draw_per_tick);
    }

    if task.is_completed() {
        if !recipe.matches(&slots[input_slots.clone()]) {
            tracing::warn!(recipe = recipe.id(), "inputs removed mid-task, dropping");
            *task_slot = None;
            return;
        }
        let output = recipe.assemble(&slots[input_slots.clone()]);
        if !output_fits(&slots[output_slot], &output) {
            return;
        }
        recipe.consume_inputs(&mut slots[input_slots]);
        deliver_output(&mut slots[output_slot], &output);
        events.push(MachineEvent::SmeltCompleted {
            recipe: recipe.id().to_string(),
            output: output.item().clone(),
        });
        *task_slot = None;
    }
}

/// Accept the first matching recipe as a new task
fn accept_task(
    task_slot: &mut Option<SmeltTask>,
    input_slots: &[ItemStack],
    can_accept: bool,
    recipes: &SmeltingCatalog,
    events: &mut Vec<MachineEvent>,
) {
    if !can_accept {
        return;
    }
    if let Some(recipe) = recipes.find_match(input_slots) {
        *task_slot = Some(SmeltTask::new(recipe.id.clone(), recipe.energy_cost));
        events.push(MachineEvent::TaskAccepted {
            recipe: recipe.id.clone(),
        });
    }
}

fn output_fits(slot: &ItemStack, output: &ItemStack) -> bool {
    slot.is_empty() || slot.is(output.item())
}

fn deliver_output(slot: &mut ItemStack, output: &ItemStack) {
    if slot.is_empty() {
        *slot = output.clone();
    } else {
        slot.grow(output.count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;

    fn loaded_smelter() -> (PrimitiveSmelter, FuelRegistry, SmeltingCatalog) {
        let mut smelter = PrimitiveSmelter::new();
        smelter.set_slot(1, ItemStack::new(ItemId::new("iron_ingot"), 8));
        smelter.set_slot(2, ItemStack::new(ItemId::new("redstone"), 8));
        (smelter, FuelRegistry::with_defaults(), SmeltingCatalog::with_defaults())
    }

    #[test]
    fn test_idle_without_fuel_or_inputs() {
        let mut smelter = PrimitiveSmelter::new();
        let fuels = FuelRegistry::with_defaults();
        let recipes = SmeltingCatalog::with_defaults();

        let events = smelter.tick(&fuels, &recipes);
        assert!(events.is_empty());
        assert!(!smelter.is_burning());
        assert!(!smelter.is_active());
    }

    #[test]
    fn test_fuel_ignites_only_with_pending_work() {
        let mut smelter = PrimitiveSmelter::new();
        let fuels = FuelRegistry::with_defaults();
        let recipes = SmeltingCatalog::with_defaults();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("coal"), 8));

        // No inputs: fuel must not be touched
        smelter.tick(&fuels, &recipes);
        assert!(!smelter.is_burning());
        assert_eq!(smelter.fuel_slot().count(), 8);

        // Inputs arrive: the same tick accepts the task and lights up
        smelter.set_slot(1, ItemStack::new(ItemId::new("iron_ingot"), 1));
        smelter.set_slot(2, ItemStack::new(ItemId::new("redstone"), 1));
        let events = smelter.tick(&fuels, &recipes);
        assert!(smelter.is_burning());
        assert_eq!(smelter.fuel_slot().count(), 7);
        assert!(events.contains(&MachineEvent::BurnStarted {
            fuel: ItemId::new("coal"),
            duration: 1600,
        }));
    }

    #[test]
    fn test_non_fuel_in_fuel_slot_is_ignored() {
        let (mut smelter, fuels, recipes) = loaded_smelter();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("cobblestone"), 4));

        smelter.tick(&fuels, &recipes);
        assert!(!smelter.is_burning());
        assert_eq!(smelter.fuel_slot().count(), 4);
    }

    #[test]
    fn test_disabled_machine_does_not_ignite() {
        let (mut smelter, fuels, recipes) = loaded_smelter();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("coal"), 1));
        smelter.set_can_act(false);

        smelter.tick(&fuels, &recipes);
        assert!(!smelter.is_burning());
        assert_eq!(smelter.fuel_slot().count(), 1);
        assert!(!smelter.is_active());
    }

    #[test]
    fn test_burn_ticks_down_while_disabled() {
        let (mut smelter, fuels, recipes) = loaded_smelter();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("stick"), 1));
        smelter.tick(&fuels, &recipes);
        assert!(smelter.is_burning());
        let remaining_before = smelter.burn_progress();

        smelter.set_can_act(false);
        smelter.tick(&fuels, &recipes);
        assert!(smelter.burn_progress() < remaining_before);
        assert!(!smelter.is_active(), "disabled machine is never active");
    }

    #[test]
    fn test_smelt_produces_output() {
        let (mut smelter, fuels, recipes) = loaded_smelter();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("coal"), 8));

        // conductive_iron: 2400 energy at 20/tick = 120 ticks minimum
        let mut completed = false;
        for _ in 0..200 {
            let events = smelter.tick(&fuels, &recipes);
            if events.iter().any(|e| matches!(e, MachineEvent::SmeltCompleted { .. })) {
                completed = true;
                break;
            }
        }
        assert!(completed, "smelt should complete within 200 ticks");
        assert!(smelter.output_slot().is(&ItemId::new("conductive_iron")));
        assert_eq!(smelter.slot(1).count(), 7, "one iron consumed");
        assert_eq!(smelter.slot(2).count(), 7, "one redstone consumed");
    }

    #[test]
    fn test_can_accept_task_with_fuel_but_no_burn() {
        let mut smelter = PrimitiveSmelter::new();
        assert!(!smelter.can_accept_task());
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("coal"), 1));
        assert!(smelter.can_accept_task());
    }

    #[test]
    fn test_persistence_tag_and_components_agree() {
        let (mut smelter, fuels, recipes) = loaded_smelter();
        smelter.set_slot(FUEL_SLOT, ItemStack::new(ItemId::new("coal"), 1));
        smelter.tick(&fuels, &recipes);
        assert!(smelter.is_burning());

        let mut tag = CompoundTag::new();
        smelter.save_additional(&mut tag);
        let components = smelter.collect_components();

        let mut from_tag = PrimitiveSmelter::new();
        from_tag.load_additional(&tag);
        let mut from_components = PrimitiveSmelter::new();
        from_components.apply_components(&components);

        assert_eq!(
            from_tag.energy.burn(),
            from_components.energy.burn(),
            "both encodings must restore the same burn state"
        );
    }

    #[test]
    fn test_cold_machine_collects_no_components() {
        let smelter = PrimitiveSmelter::new();
        assert_eq!(smelter.collect_components(), SmelterComponents::default());
    }

    #[test]
    fn test_remove_components_from_tag() {
        let mut tag = CompoundTag::new();
        tag.put_int(keys::BURN_TIME, 5);
        tag.put_int(keys::BURN_DURATION, 10);
        PrimitiveSmelter::remove_components_from_tag(&mut tag);
        assert!(!tag.contains(keys::BURN_TIME));
        assert!(!tag.contains(keys::BURN_DURATION));
    }

    #[test]
    fn test_alloy_smelter_needs_buffer_energy() {
        let mut smelter = AlloySmelter::new();
        let recipes = SmeltingCatalog::with_defaults();
        smelter.set_slot(0, ItemStack::new(ItemId::new("iron_ingot"), 4));
        smelter.set_slot(1, ItemStack::new(ItemId::new("redstone"), 4));

        // No energy: no task is accepted
        smelter.tick(&recipes);
        assert!(!smelter.is_active());

        smelter.receive_energy(10_000);
        let events = smelter.tick(&recipes);
        assert!(events.contains(&MachineEvent::TaskAccepted {
            recipe: "conductive_iron".into()
        }));

        let mut completed = false;
        for _ in 0..200 {
            let events = smelter.tick(&recipes);
            if events.iter().any(|e| matches!(e, MachineEvent::SmeltCompleted { .. })) {
                completed = true;
                break;
            }
        }
        assert!(completed);
        assert!(smelter.output_slot().is(&ItemId::new("conductive_iron")));
        assert!(smelter.energy_stored() < 10_000, "buffer drained by the craft");
    }
}
