use crate::request::LocateRequest;

/// Groups requests by an extracted key, sorted by key, preserving the
/// original relative order within each group.
///
/// Works on a cloned snapshot: the source slice is never reordered or
/// mutated, and every call re-derives its own copy, so repeated grouping
/// runs over the same records do not interfere.
pub fn group_by<K, F>(
    requests: &[LocateRequest],
    key: F,
) -> impl Iterator<Item = (K, Vec<LocateRequest>)>
where
    K: Ord + Clone,
    F: Fn(&LocateRequest) -> K,
{
    let mut snapshot: Vec<LocateRequest> = requests.to_vec();
    // Stable sort, so equal keys keep their input order
    snapshot.sort_by(|a, b| key(a).cmp(&key(b)));

    let mut groups: Vec<(K, Vec<LocateRequest>)> = Vec::new();
    for req in snapshot {
        let k = key(&req);
        match groups.last_mut() {
            Some((last, members)) if *last == k => members.push(req),
            _ => groups.push((k, vec![req])),
        }
    }

    groups.into_iter()
}
