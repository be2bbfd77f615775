/*!
 * Data Structures
 *
 * Containers shared by the scheduling engine:
 * - Ordered queue with an injected comparator and stable insertion
 */

mod ordered_queue;

pub use ordered_queue::{Comparator, OrderedQueue};
