//! Shadow-state cache
//!
//! [`StateCache`] owns the device, the shadow descriptor and the unit
//! table. Callers build a full [`StateDescriptor`] for each draw and hand
//! it to [`apply`](StateCache::apply); the cache issues only the calls
//! needed to move the device from the shadow to the candidate.
//!
//! The shadow is only trustworthy while every call that touches tracked
//! state goes through the cache. Code that drives the device directly
//! must follow up with [`resync`](StateCache::resync).

use std::marker::PhantomData;

use crate::config::{CacheConfig, DeviceCaps};
use crate::descriptor::StateDescriptor;
use crate::device::Device;
use crate::plan::{FULL_APPLY, Policy, SUB_APPLY, Step};
use crate::reconcile::Emitter;
use crate::stats::CacheStats;
use crate::units::UnitTable;

/// Shadow copy of device state plus the reconcilers that keep it in sync.
///
/// Not `Send` or `Sync`: a device context belongs to one thread.
pub struct StateCache<D: Device> {
    pub(crate) device: D,
    pub(crate) shadow: StateDescriptor,
    pub(crate) caps: DeviceCaps,
    pub(crate) units: UnitTable,
    pub(crate) stats: CacheStats,
    _not_send: PhantomData<*const ()>,
}

impl<D: Device> StateCache<D> {
    /// Wrap a device whose state already matches [`StateDescriptor::default`].
    ///
    /// Nothing is issued. Use [`with_sync`](Self::with_sync) when the
    /// device may start somewhere else.
    pub fn new(device: D, config: CacheConfig) -> Self {
        tracing::debug!(
            allow_shadow = config.device.allow_shadow,
            logic_op = config.device.logic_op,
            max_clip_distances = config.device.max_clip_distances,
            "state cache created"
        );
        Self {
            device,
            shadow: StateDescriptor::default(),
            caps: config.device,
            units: config.units,
            stats: CacheStats::default(),
            _not_send: PhantomData,
        }
    }

    /// Wrap a device and force it to the default state
    pub fn with_sync(device: D, config: CacheConfig) -> Self {
        let mut cache = Self::new(device, config);
        cache.resync(&StateDescriptor::default());
        cache
    }

    /// Bring the device to `candidate`, issuing only what differs.
    ///
    /// The whole candidate becomes the new shadow, including groups the
    /// device capabilities kept from being issued.
    pub fn apply(&mut self, candidate: &StateDescriptor) {
        let (issued, skipped) = self.run_plan(&FULL_APPLY, candidate, false);
        self.shadow = *candidate;
        self.stats.applies = self.stats.applies.wrapping_add(1);
        tracing::trace!(issued, skipped, "apply");
    }

    /// Reconcile only masks, framebuffers, scissor and viewport.
    ///
    /// Used between passes that share every other piece of state. Only the
    /// reconciled fields are copied into the shadow; the rest of the
    /// candidate is ignored.
    pub fn sub_apply(&mut self, candidate: &StateDescriptor) {
        let (issued, skipped) = self.run_plan(&SUB_APPLY, candidate, false);
        for step in SUB_APPLY {
            step.group.copy_fields(candidate, &mut self.shadow);
        }
        self.stats.sub_applies = self.stats.sub_applies.wrapping_add(1);
        tracing::trace!(issued, skipped, "sub_apply");
    }

    /// Issue every group of the full plan regardless of the shadow.
    ///
    /// Recovers from unknown device state (context creation, foreign code
    /// touching the device). Capability gating still applies.
    pub fn resync(&mut self, candidate: &StateDescriptor) {
        let (issued, _) = self.run_plan(&FULL_APPLY, candidate, true);
        self.shadow = *candidate;
        self.stats.resyncs = self.stats.resyncs.wrapping_add(1);
        tracing::debug!(issued, "resynced device state");
    }

    /// Run a plan against the shadow, returning (issued, skipped) call counts
    fn run_plan(&mut self, plan: &[Step], candidate: &StateDescriptor, force: bool) -> (u64, u64) {
        let before = self.stats;
        let mut emitter = Emitter {
            device: &mut self.device,
            stats: &mut self.stats,
            units: &self.units,
            caps: &self.caps,
            force,
        };
        for step in plan {
            if !step.requires.met(emitter.caps) {
                continue;
            }
            emitter.force = force || step.policy == Policy::Always;
            emitter.group(step.group, candidate, &self.shadow);
        }
        (
            self.stats.calls_issued.wrapping_sub(before.calls_issued),
            self.stats.calls_skipped.wrapping_sub(before.calls_skipped),
        )
    }

    /// State the cache believes the device is in
    pub fn shadow(&self) -> &StateDescriptor {
        &self.shadow
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Raw device access. Tracked state changed through here leaves the
    /// shadow stale until the next [`resync`](Self::resync).
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    pub fn caps(&self) -> &DeviceCaps {
        &self.caps
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}

impl<D: Device + Default> Default for StateCache<D> {
    fn default() -> Self {
        Self::new(D::default(), CacheConfig::default())
    }
}

impl<D: Device + std::fmt::Debug> std::fmt::Debug for StateCache<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCache")
            .field("device", &self.device)
            .field("caps", &self.caps)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
