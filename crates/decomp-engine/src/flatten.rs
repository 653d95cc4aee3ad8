//! Output flattening.
//!
//! Expands one keyword record into fixed-schema output rows: one row per
//! verb tuple for a single role, the cross product of the role's verb lists
//! when two or three roles combine. Every row carries every schema field;
//! unset fields stay empty strings.

use decomp_core::{FlagPart, KeywordRecord, OutputRecord, RoleFlag, VerbTuple};

/// Link column of the role, e.g. resultLink
fn set_role_link(row: &mut OutputRecord, flag: RoleFlag, link: &str) {
    match flag {
        RoleFlag::Result => row.result_link = link.to_string(),
        RoleFlag::Means => row.means_link = link.to_string(),
        RoleFlag::IndirectEngagement => row.indirect_link = link.to_string(),
        RoleFlag::Benefactive => {
            row.benefactive_link = if link.is_empty() {
                "for".to_string()
            } else {
                link.to_string()
            };
        }
        _ => {}
    }
}

/// Verb/prep/additional-object columns of the role
fn set_role_verb(row: &mut OutputRecord, flag: RoleFlag, tuple: &VerbTuple) {
    match flag {
        RoleFlag::Result => {
            row.result_verb = tuple.verb.clone();
            row.result_verb_prep = tuple.prep.clone();
            row.result_additional_object = tuple.object.clone();
        }
        RoleFlag::Means => {
            row.means_verb = tuple.verb.clone();
            row.means_verb_prep = tuple.prep.clone();
            row.means_additional_object = tuple.object.clone();
        }
        RoleFlag::IndirectEngagement => {
            row.indirect_verb = tuple.verb.clone();
            row.indirect_verb_prep = tuple.prep.clone();
            row.indirect_additional_object = tuple.object.clone();
        }
        _ => {}
    }
}

/// The keyword lands in the role's own object column
fn set_role_object(row: &mut OutputRecord, flag: RoleFlag, improved: &str) {
    match flag {
        RoleFlag::Result => row.result_object = improved.to_string(),
        RoleFlag::Means => row.means_object = improved.to_string(),
        RoleFlag::IndirectEngagement => row.indirect_object = improved.to_string(),
        RoleFlag::Benefactive => row.benefactive = improved.to_string(),
        _ => row.object = improved.to_string(),
    }
}

/// Primary verb columns
fn set_verb(row: &mut OutputRecord, tuple: &VerbTuple) {
    row.verb = tuple.verb.clone();
    row.verb_prep = tuple.prep.clone();
    row.additional_object = tuple.object.clone();
}

fn apply_subject(row: &mut OutputRecord, record: &KeywordRecord, index: usize) {
    let Some(subject) = record.subjects.get(index) else {
        return;
    };
    row.subject_token = subject.token.clone();
    row.subject_type = subject.subject_type.clone();
    row.is_passive = subject.is_passive.to_string();
    row.agent_info = subject.agent.clone();
}

fn flatten_no_verbs(record: &KeywordRecord) -> Vec<OutputRecord> {
    use decomp_core::NoVerbKind;

    let keyword = &record.keyword;
    let Some(special) = &record.special else {
        return vec![OutputRecord::for_keyword(keyword, "no-verbs")];
    };

    match special.kind {
        NoVerbKind::Junk | NoVerbKind::Role | NoVerbKind::Subject => {
            let mut row = OutputRecord::for_keyword(keyword, special.kind.as_str());
            match special.kind {
                NoVerbKind::Role => row.role = special.link.clone(),
                NoVerbKind::Subject => {
                    row.subject_token = keyword.improved.clone();
                    row.subject_type = "Undefined".to_string();
                }
                _ => {}
            }
            vec![row]
        }
        NoVerbKind::ExtractedObject => {
            if special.verbs.is_empty() {
                let mut row = OutputRecord::for_keyword(keyword, special.kind.as_str());
                row.extracted_object = keyword.found.clone();
                return vec![row];
            }
            special
                .verbs
                .iter()
                .map(|verb| {
                    let mut row = OutputRecord::for_keyword(keyword, special.kind.as_str());
                    row.extracted_verb = verb.trim().to_string();
                    row.extracted_object = keyword.found.clone();
                    row.extracted_link = special.link.trim().to_string();
                    row
                })
                .collect()
        }
    }
}

fn flatten_single(record: &KeywordRecord, part: FlagPart) -> Vec<OutputRecord> {
    let keyword = &record.keyword;
    let flag = part.base;
    let tuples = record.tuples_for(flag);
    let mut rows = Vec::new();

    match flag {
        RoleFlag::Subject => {
            for (index, tuple) in tuples.iter().enumerate() {
                let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
                set_verb(&mut row, tuple);
                if let Some(subject) = record.subjects.get(index) {
                    row.subject_token = subject.token.clone();
                    row.subject_type = subject.subject_type.clone();
                }
                rows.push(row);
            }
        }
        RoleFlag::Action | RoleFlag::State => {
            for (index, tuple) in tuples.iter().enumerate() {
                let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
                row.object = keyword.improved.clone();
                if !tuple.verb.is_empty() {
                    set_verb(&mut row, tuple);
                    apply_subject(&mut row, record, index);
                }
                rows.push(row);
            }
        }
        RoleFlag::Benefactive => {
            let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
            row.benefactive = keyword.improved.clone();
            row.benefactive_link = "for".to_string();
            rows.push(row);
        }
        RoleFlag::Enum => {
            let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
            row.object = keyword.improved.clone();
            rows.push(row);
        }
        RoleFlag::Result | RoleFlag::Means | RoleFlag::IndirectEngagement => {
            for (index, tuple) in tuples.iter().enumerate() {
                let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
                set_role_link(&mut row, flag, &tuple.link);
                set_role_verb(&mut row, flag, tuple);
                set_role_object(&mut row, flag, &keyword.improved);
                apply_subject(&mut row, record, index);
                rows.push(row);
            }
        }
        _ => {
            tracing::error!(keyword = %keyword.improved, flag = %flag,
                "unexpected single flag at flattening");
        }
    }
    rows
}

/// `action+role`: the action list crossed with the role's own list
fn flatten_action_combo(record: &KeywordRecord, flag: RoleFlag) -> Vec<OutputRecord> {
    let keyword = &record.keyword;
    let actions = record.tuples_for(RoleFlag::Action);
    let role_tuples = record.tuples_for(flag);
    let mut rows = Vec::new();

    if role_tuples.is_empty() {
        for action in actions {
            let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
            set_role_link(&mut row, flag, &action.link);
            set_role_verb(&mut row, flag, action);
            set_role_object(&mut row, flag, &keyword.improved);
            rows.push(row);
        }
        return rows;
    }

    for (index, action) in actions.iter().enumerate() {
        for tuple in role_tuples {
            let mut row = OutputRecord::for_keyword(keyword, flag.as_str());
            set_verb(&mut row, action);
            set_role_link(&mut row, flag, &action.link);
            set_role_verb(&mut row, flag, tuple);
            set_role_object(&mut row, flag, &keyword.improved);
            apply_subject(&mut row, record, index);
            rows.push(row);
        }
    }
    rows
}

fn flatten_multi(record: &KeywordRecord, parts: &[FlagPart]) -> Vec<OutputRecord> {
    let keyword = &record.keyword;
    let has_action = parts
        .iter()
        .any(|p| p.with_action || matches!(p.base, RoleFlag::Action | RoleFlag::State));

    if !has_action {
        // Two plain roles: pair product, the second role names the row
        let (first, second) = (parts[0].base, parts[1].base);
        let mut rows = Vec::new();
        for (index, left) in record.tuples_for(first).iter().enumerate() {
            for right in record.tuples_for(second) {
                let mut row = OutputRecord::for_keyword(keyword, second.as_str());
                set_role_link(&mut row, first, &left.link);
                set_role_verb(&mut row, first, left);
                set_role_verb(&mut row, second, right);
                set_role_object(&mut row, second, &keyword.improved);
                apply_subject(&mut row, record, index);
                rows.push(row);
            }
        }
        return rows;
    }

    let leads_with_action = parts[0].with_action;
    if parts.len() == 2 && !leads_with_action {
        // action/state verbs crossed with the second role's verbs
        let action_part = parts
            .iter()
            .find(|p| matches!(p.base, RoleFlag::Action | RoleFlag::State))
            .copied()
            .unwrap_or(parts[0]);
        let other = parts
            .iter()
            .find(|p| p.base != action_part.base)
            .copied()
            .unwrap_or(parts[1]);
        let mut rows = Vec::new();
        for (index, action) in record.tuples_for(action_part.base).iter().enumerate() {
            for tuple in record.tuples_for(other.base) {
                let mut row = OutputRecord::for_keyword(keyword, other.base.as_str());
                set_verb(&mut row, action);
                set_role_link(&mut row, other.base, &action.link);
                set_role_verb(&mut row, other.base, tuple);
                set_role_object(&mut row, other.base, &keyword.improved);
                apply_subject(&mut row, record, index);
                rows.push(row);
            }
        }
        return rows;
    }

    // action+role1 combined with role2: the full triple product
    let flag2 = parts.last().map(|p| p.base).unwrap_or(RoleFlag::Action);
    let flag1 = if leads_with_action {
        parts[0].base
    } else {
        parts
            .iter()
            .map(|p| p.base)
            .find(|&b| !matches!(b, RoleFlag::Action | RoleFlag::State) && b != flag2)
            .unwrap_or(flag2)
    };
    let mut rows = Vec::new();
    for (index, action) in record.tuples_for(RoleFlag::Action).iter().enumerate() {
        for middle in record.tuples_for(flag1) {
            for last in record.tuples_for(flag2) {
                let mut row = OutputRecord::for_keyword(keyword, flag2.as_str());
                set_verb(&mut row, action);
                set_role_link(&mut row, flag1, &action.link);
                set_role_verb(&mut row, flag1, middle);
                set_role_link(&mut row, flag2, &middle.link);
                set_role_verb(&mut row, flag2, last);
                set_role_object(&mut row, flag2, &keyword.improved);
                apply_subject(&mut row, record, index);
                rows.push(row);
            }
        }
    }
    rows
}

/// Expand one keyword record into its output rows.
pub fn flatten_record(record: &KeywordRecord) -> Vec<OutputRecord> {
    if record.expertise {
        return vec![OutputRecord::for_keyword(&record.keyword, "expertise in")];
    }
    if record.no_verbs {
        return flatten_no_verbs(record);
    }
    match record.parts.as_slice() {
        [] => Vec::new(),
        [part] if !part.with_action => flatten_single(record, *part),
        [part] => flatten_action_combo(record, part.base),
        parts => flatten_multi(record, parts),
    }
}

// ============================================================================
// Tests
// ============================================================================
