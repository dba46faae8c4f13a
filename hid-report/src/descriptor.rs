//! Parsed report descriptor model.
//!
//! Storage is three flat fixed-capacity arenas: reports, field groups and
//! field spans. Groups point at their report by index and spans at their
//! group, so [`Report`] and [`FieldGroup`] are borrowed views and fields
//! are expanded on demand.

use heapless::Vec;

use crate::field::{self, generic_desktop, Field};
use crate::item::items;
use crate::usage::{Direction, Resolver, Usage, UsagePage, UsageSource};

/// Maximum reports (top-level Application collections).
pub const MAX_REPORTS: usize = 8;

/// Maximum field groups across all reports.
pub const MAX_GROUPS: usize = 64;

/// Maximum sealed usages (field spans) across all groups.
pub const MAX_SPANS: usize = 192;

/// Descriptor parsing errors.
///
/// Malformed input never fails parsing; only capacity limits do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    TooManyReports,
    TooManyGroups,
    TooManyFields,
    TooManyUsages,
}

impl core::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DescriptorError::TooManyReports => write!(f, "more than {MAX_REPORTS} reports"),
            DescriptorError::TooManyGroups => write!(f, "more than {MAX_GROUPS} field groups"),
            DescriptorError::TooManyFields => write!(f, "more than {MAX_SPANS} field spans"),
            DescriptorError::TooManyUsages => write!(f, "too many pending usages"),
        }
    }
}

/// Identity of a top-level Application collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Application {
    pub page: UsagePage,
    pub usage: u32,
}

/// Coarse class of an [`Application`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApplicationKind {
    Pointer,
    Mouse,
    Joystick,
    Gamepad,
    Keyboard,
    Keypad,
    MultiAxis,
    Other,
}

impl Application {
    #[must_use]
    pub const fn kind(&self) -> ApplicationKind {
        if !matches!(self.page, UsagePage::GenericDesktop) {
            return ApplicationKind::Other;
        }
        match self.usage {
            generic_desktop::POINTER => ApplicationKind::Pointer,
            generic_desktop::MOUSE => ApplicationKind::Mouse,
            generic_desktop::JOYSTICK => ApplicationKind::Joystick,
            generic_desktop::GAMEPAD => ApplicationKind::Gamepad,
            generic_desktop::KEYBOARD => ApplicationKind::Keyboard,
            generic_desktop::KEYPAD => ApplicationKind::Keypad,
            generic_desktop::MULTI_AXIS_CONTROLLER => ApplicationKind::MultiAxis,
            _ => ApplicationKind::Other,
        }
    }

    /// Joystick or Gamepad.
    #[must_use]
    pub const fn is_joystick(&self) -> bool {
        matches!(
            self.kind(),
            ApplicationKind::Joystick | ApplicationKind::Gamepad
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReportEntry {
    application: Option<Application>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupEntry {
    report: u8,
    direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanEntry {
    group: u8,
    usage: Usage,
}

/// Structured model of a report descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDescriptor {
    reports: Vec<ReportEntry, MAX_REPORTS>,
    groups: Vec<GroupEntry, MAX_GROUPS>,
    spans: Vec<SpanEntry, MAX_SPANS>,
}

impl ReportDescriptor {
    /// Parse a raw report descriptor.
    ///
    /// A payload running past the end stops parsing; everything before it
    /// is kept.
    pub fn parse(bytes: &[u8]) -> Result<Self, DescriptorError> {
        let mut resolver = Resolver::new();
        let mut it = items(bytes);
        for item in it.by_ref() {
            resolver.step(&item)?;
        }
        if it.is_truncated() {
            warn!(
                "hid: descriptor truncated at offset {} of {}",
                it.offset(),
                bytes.len()
            );
        }
        let descriptor = resolver.finish();
        debug!(
            "hid: parsed {} reports, {} groups, {} spans",
            descriptor.reports.len(),
            descriptor.groups.len(),
            descriptor.spans.len()
        );
        Ok(descriptor)
    }

    /// Number of reports.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    #[must_use]
    pub fn report(&self, index: usize) -> Option<Report<'_>> {
        (index < self.reports.len()).then_some(Report {
            descriptor: self,
            index,
        })
    }

    pub fn reports(&self) -> impl Iterator<Item = Report<'_>> + '_ {
        (0..self.reports.len()).map(move |index| Report {
            descriptor: self,
            index,
        })
    }

    /// Reports whose application is a joystick-class device.
    #[must_use]
    pub fn joystick_count(&self) -> usize {
        self.reports().filter(Report::is_joystick).count()
    }

    pub(crate) fn begin_report(
        &mut self,
        application: Option<Application>,
    ) -> Result<(), DescriptorError> {
        self.reports
            .push(ReportEntry { application })
            .map_err(|_| {
                warn!("hid: more than {} reports", MAX_REPORTS);
                DescriptorError::TooManyReports
            })
    }

    /// Append a sealed usage to the active report.
    ///
    /// A Report Id span always opens a new group; anything else joins the
    /// newest group of the same direction, opening one if none exists.
    pub(crate) fn push_span(
        &mut self,
        direction: Direction,
        usage: Usage,
    ) -> Result<(), DescriptorError> {
        if self.reports.is_empty() {
            // Data items outside any Application collection
            self.begin_report(None)?;
        }
        let report = (self.reports.len() - 1) as u8;

        let existing = match usage.source {
            UsageSource::ReportId(_) => None,
            _ => self
                .groups
                .iter()
                .rposition(|g| g.report == report && g.direction == direction),
        };
        let group = match existing {
            Some(group) => group,
            None => {
                self.groups
                    .push(GroupEntry { report, direction })
                    .map_err(|_| {
                        warn!("hid: more than {} field groups", MAX_GROUPS);
                        DescriptorError::TooManyGroups
                    })?;
                self.groups.len() - 1
            }
        };

        self.spans
            .push(SpanEntry {
                group: group as u8,
                usage,
            })
            .map_err(|_| {
                warn!("hid: more than {} field spans", MAX_SPANS);
                DescriptorError::TooManyFields
            })
    }
}

/// Borrowed view of one report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    descriptor: &'a ReportDescriptor,
    index: usize,
}

impl<'a> Report<'a> {
    /// Position in the descriptor, in appearance order.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Application that opened this report; `None` for the implicit report
    /// holding data items seen before any Application collection.
    #[must_use]
    pub fn application(&self) -> Option<Application> {
        self.descriptor
            .reports
            .get(self.index)
            .and_then(|r| r.application)
    }

    #[must_use]
    pub fn is_joystick(&self) -> bool {
        self.application().is_some_and(|a| a.is_joystick())
    }

    /// Field groups of one direction, in appearance order.
    pub fn groups(&self, direction: Direction) -> impl Iterator<Item = FieldGroup<'a>> + 'a {
        let descriptor = self.descriptor;
        let report = self.index;
        descriptor
            .groups
            .iter()
            .enumerate()
            .filter(move |(_, g)| usize::from(g.report) == report && g.direction == direction)
            .map(move |(index, g)| FieldGroup {
                descriptor,
                index,
                direction: g.direction,
            })
    }

    pub fn inputs(&self) -> impl Iterator<Item = FieldGroup<'a>> + 'a {
        self.groups(Direction::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = FieldGroup<'a>> + 'a {
        self.groups(Direction::Output)
    }

    pub fn features(&self) -> impl Iterator<Item = FieldGroup<'a>> + 'a {
        self.groups(Direction::Feature)
    }
}

/// Borrowed view of one field group: the fields of a report sharing a
/// direction and, when present, a leading Report Id.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup<'a> {
    descriptor: &'a ReportDescriptor,
    index: usize,
    direction: Direction,
}

impl<'a> FieldGroup<'a> {
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    fn spans(&self) -> impl Iterator<Item = &'a Usage> + 'a {
        let descriptor = self.descriptor;
        let group = self.index;
        descriptor
            .spans
            .iter()
            .filter(move |s| usize::from(s.group) == group)
            .map(|s| &s.usage)
    }

    /// Expected Report Id byte, when the group starts with one.
    #[must_use]
    pub fn report_id(&self) -> Option<u32> {
        match self.spans().next()?.source {
            UsageSource::ReportId(id) => Some(id),
            _ => None,
        }
    }

    /// Fields in wire order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + 'a {
        self.spans().flat_map(field::expand)
    }

    /// Total bits across all fields.
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        self.spans().map(|u| u.property.bit_len()).sum()
    }

    /// Total bytes across all fields, rounded up.
    #[must_use]
    pub fn byte_len(&self) -> u64 {
        self.bit_len().div_ceil(8)
    }
}
