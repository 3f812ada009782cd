/// Merges two sequences sorted under `cmp` into `output`, combining the
/// elements that compare equal with `op`. The combination may cancel out, in
/// which case `op` returns None and nothing is pushed.
///
/// Used to add polynomials whose terms are sorted by monomial.
pub fn sum<T>(
    mut a_iter: impl Iterator<Item = T>,
    mut b_iter: impl Iterator<Item = T>,
    cmp: impl Fn(&T, &T) -> std::cmp::Ordering,
    op: impl Fn(T, T) -> Option<T>,
    output: &mut Vec<T>,
) {
    let mut a = a_iter.next();
    let mut b = b_iter.next();

    loop {
        match (a, b) {
            (Some(va), Some(vb)) => match cmp(&va, &vb) {
                std::cmp::Ordering::Equal => {
                    if let Some(r) = op(va, vb) {
                        output.push(r);
                    }
                    a = a_iter.next();
                    b = b_iter.next();
                }
                std::cmp::Ordering::Less => {
                    output.push(va);
                    a = a_iter.next();
                    b = Some(vb);
                }
                std::cmp::Ordering::Greater => {
                    output.push(vb);
                    a = Some(va);
                    b = b_iter.next();
                }
            },
            (None, Some(b)) => {
                output.push(b);
                output.extend(b_iter);
                break;
            }
            (Some(a), None) => {
                output.push(a);
                output.extend(a_iter);
                break;
            }
            (None, None) => {
                break;
            }
        }
    }
}
