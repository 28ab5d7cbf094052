//! Fixed tables backing the real-name string-id range.

/// Guest given names, indexed by `index % NAMES.len()`.
pub(crate) const NAMES: &[&str] = &[
    "Aaron", "Abdul", "Adrian", "Albert", "Alexis", "Alfred", "Alison", "Amanda", "Andrew",
    "Angela", "Anthony", "Arnold", "Barbara", "Barry", "Belinda", "Bernard", "Bianca", "Brenda",
    "Brian", "Bridget", "Carol", "Cedric", "Charles", "Chloe", "Clive", "Colin", "Daniel",
    "Deirdre", "Dennis", "Derek", "Donna", "Dorothy", "Duncan", "Edward", "Eleanor", "Emma",
    "Eric", "Felicity", "Frank", "Gareth", "Gemma", "George", "Gordon", "Graham", "Hannah",
    "Harold", "Heather", "Helen", "Henry", "Howard", "Ian", "Irene", "Isabel", "Jack", "Janet",
    "Jeremy", "Joanna", "Jonathan", "Julia", "Katherine", "Keith", "Kevin", "Kirsty", "Laura",
    "Lawrence", "Leonard", "Lesley", "Linda", "Lucy", "Malcolm", "Margaret", "Marion", "Martin",
    "Maurice", "Melanie", "Michael", "Monica", "Nancy", "Nicholas", "Nigel", "Norman", "Olivia",
    "Oscar", "Pamela", "Patrick", "Pauline", "Peter", "Philip", "Rachel", "Raymond", "Rebecca",
    "Reginald", "Richard", "Robert", "Roger", "Ronald", "Rosemary", "Russell", "Samantha",
    "Sandra", "Sarah", "Sheila", "Sidney", "Simon", "Stanley", "Stephen", "Stuart", "Susan",
    "Sylvia", "Terence", "Thomas", "Timothy", "Tonia", "Tony", "Tracy", "Travis", "Trevor",
    "Troy", "Tyler", "Ulysses", "Valerie", "Vanessa", "Vernon", "Veronica", "Victor", "Victoria",
    "Vincent", "Virginia", "Vivian", "Walter", "Wanda", "Warren", "Wayne", "Wendy", "Wesley",
    "William", "Wilson", "Winston", "Wyatt", "Xavier", "Yvonne", "Zachary", "Zola",
];

/// Surname initials, indexed by `(index >> 10) % INITIALS.len()`.
pub(crate) const INITIALS: &[char] = &[
    'B', 'C', 'D', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'R', 'S', 'T', 'W',
];

/// Append the `"<Name> <Initial>."` form for a real-name table index.
pub(crate) fn append_real_name(out: &mut String, index: u16) {
    out.push_str(NAMES[index as usize % NAMES.len()]);
    out.push(' ');
    out.push(INITIALS[(index >> 10) as usize % INITIALS.len()]);
    out.push('.');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_and_initial_selection() {
        let mut out = String::new();
        append_real_name(&mut out, 0);
        assert_eq!(out, "Aaron B.");

        let mut out = String::new();
        append_real_name(&mut out, 1 << 10);
        assert_eq!(out, "Aaron C.");

        // Name wraps modulo the table; initial comes from the high bits.
        let mut out = String::new();
        append_real_name(&mut out, NAMES.len() as u16);
        assert_eq!(out, "Aaron B.");
    }
}
