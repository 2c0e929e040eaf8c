use super::{EventKind, LeaveType, VisitType};

/// Icon and color used to draw an event. Visits and leave use disjoint palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub color: &'static str,
    pub icon: &'static str,
}

impl Appearance {
    pub fn for_kind(kind: &EventKind) -> Self {
        match kind {
            EventKind::Visit { visit_type } => Self::for_visit(*visit_type),
            EventKind::Leave { leave_type } => Self::for_leave(*leave_type),
            // Unallocated visits keep their icon but are greyed out
            EventKind::Unallocated { visit_type } => Self {
                color: "#9CA3AF",
                icon: Self::for_visit(*visit_type).icon,
            },
        }
    }

    fn for_visit(visit_type: VisitType) -> Self {
        match visit_type {
            VisitType::HomeVisit => Self { color: "#3B82F6", icon: "🏠" },
            VisitType::VideoCall => Self { color: "#8B5CF6", icon: "📹" },
            VisitType::Hospital => Self { color: "#EF4444", icon: "🏥" },
            VisitType::AudioCall => Self { color: "#10B981", icon: "📞" },
            VisitType::InPerson => Self { color: "#F59E0B", icon: "👥" },
        }
    }

    fn for_leave(leave_type: LeaveType) -> Self {
        match leave_type {
            LeaveType::Annual => Self { color: "#0EA5E9", icon: "🌴" },
            LeaveType::Sick => Self { color: "#DC2626", icon: "🤒" },
            LeaveType::Training => Self { color: "#6366F1", icon: "🎓" },
            LeaveType::Unpaid => Self { color: "#78716C", icon: "⏸" },
            LeaveType::Other => Self { color: "#64748B", icon: "📅" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const VISITS: [VisitType; 5] = [
        VisitType::HomeVisit,
        VisitType::VideoCall,
        VisitType::Hospital,
        VisitType::AudioCall,
        VisitType::InPerson,
    ];

    const LEAVES: [LeaveType; 5] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Training,
        LeaveType::Unpaid,
        LeaveType::Other,
    ];

    #[test]
    fn test_visit_and_leave_palettes_are_disjoint() {
        let visit_colors: HashSet<_> = VISITS
            .iter()
            .map(|t| Appearance::for_kind(&EventKind::Visit { visit_type: *t }).color)
            .collect();
        let leave_colors: HashSet<_> = LEAVES
            .iter()
            .map(|t| Appearance::for_kind(&EventKind::Leave { leave_type: *t }).color)
            .collect();

        assert_eq!(visit_colors.len(), VISITS.len());
        assert!(visit_colors.is_disjoint(&leave_colors));
    }

    #[test]
    fn test_unallocated_keeps_visit_icon() {
        let visit = Appearance::for_kind(&EventKind::Visit {
            visit_type: VisitType::Hospital,
        });
        let unallocated = Appearance::for_kind(&EventKind::Unallocated {
            visit_type: VisitType::Hospital,
        });
        assert_eq!(visit.icon, unallocated.icon);
        assert_ne!(visit.color, unallocated.color);
    }
}
