//! Built-in task family.
//!
//! All tabletop tasks share one 15 cm square of candidate positions centred
//! in front of the robot; the basket task uses a small grid next to the sink.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use nalgebra::{UnitQuaternion, Vector2};
use sim_eval::EvaluationConfig;

use crate::orientation::{identity, roll, yaw};
use crate::{
    linspace_grid, nested_squares, ordered_pairs, pairs_with_remaining, square_corners,
    with_fixed_target, OrientationConfig, TaskDescriptor,
};

const SPOON: &str = "bridge_spoon_generated_modified";
const TOWEL: &str = "table_cloth_generated_shorter";
const CARROT: &str = "bridge_carrot_generated_modified";
const PLATE: &str = "bridge_plate_objaverse_larger";
const SMALL_PLATE: &str = "bridge_plate_objaverse_smaller";
const EGGPLANT: &str = "eggplant";
const SINK_TARGET: &str = "dummy_sink_target_plane";
const COKE_CAN: &str = "coke_can";
const PEPSI_CAN: &str = "pepsi_can";
const SPONGE: &str = "sponge";
const LARGE_SPONGE: &str = "sponge_larger";
const KEYBOARD: &str = "keyboard_smaller";
const RABBIT: &str = "rabbit";
const GREEN_CUBE: &str = "green_cube_3cm";
const YELLOW_CUBE: &str = "yellow_cube_3cm";
const BAKED_GREEN_CUBE: &str = "baked_green_cube_3cm";
const BAKED_YELLOW_CUBE: &str = "baked_yellow_cube_3cm";

const TABLETOP_HALF_EDGE: f64 = 0.075;

fn tabletop_center() -> Vector2<f64> {
    Vector2::new(-0.16, 0.0)
}

fn tabletop_corners() -> [Vector2<f64>; 4] {
    square_corners(tabletop_center(), TABLETOP_HALF_EDGE, TABLETOP_HALF_EDGE)
}

fn rows<const N: usize>(rows: &[[UnitQuaternion<f64>; N]]) -> Vec<OrientationConfig> {
    rows.iter()
        .map(|row| OrientationConfig::new(row.to_vec()))
        .collect()
}

fn two_object(
    name: &str,
    source: &str,
    target: &str,
    instruction: &str,
    orientations: &[[UnitQuaternion<f64>; 2]],
) -> TaskDescriptor {
    TaskDescriptor::new(name, source, target, instruction)
        .with_layouts(ordered_pairs(&tabletop_corners()))
        .with_orientations(rows(orientations))
}

fn four_object(
    name: &str,
    source: &str,
    target: &str,
    distractors: [&str; 2],
    instruction: &str,
    orientations: &[[UnitQuaternion<f64>; 4]],
) -> TaskDescriptor {
    TaskDescriptor::new(name, source, target, instruction)
        .with_distractors(distractors)
        .with_layouts(pairs_with_remaining(&tabletop_corners()))
        .with_orientations(rows(orientations))
}

// Per-object rotation rows shared by several tasks.
fn carrot_rows() -> [[UnitQuaternion<f64>; 2]; 2] {
    [[yaw(PI), identity()], [yaw(-FRAC_PI_2), identity()]]
}

fn can_rows() -> [[UnitQuaternion<f64>; 2]; 2] {
    // Upright, then lying down.
    [[roll(FRAC_PI_2), identity()], [yaw(FRAC_PI_2), identity()]]
}

fn eggplant_rows() -> [[UnitQuaternion<f64>; 2]; 2] {
    [[yaw(0.0), identity()], [yaw(FRAC_PI_4), identity()]]
}

fn spoon_on_towel() -> TaskDescriptor {
    two_object(
        "PutSpoonOnTableClothInScene-v0",
        SPOON,
        TOWEL,
        "put the spoon on the towel",
        &[[identity(), identity()], [yaw(FRAC_PI_2), identity()]],
    )
    // The spoon may hang over the towel edge.
    .with_evaluation(EvaluationConfig::default().with_complete_placement(false))
}

fn carrot_on_plate() -> TaskDescriptor {
    two_object(
        "PutCarrotOnPlateInScene-v0",
        CARROT,
        PLATE,
        "put carrot on plate",
        &carrot_rows(),
    )
}

fn stack_cubes(name: &str, source: &str, target: &str) -> TaskDescriptor {
    TaskDescriptor::new(
        name,
        source,
        target,
        "stack the green block on the yellow block",
    )
    .with_layouts(nested_squares(tabletop_center(), &[0.05, 0.1]))
    .with_orientations(rows(&[[identity(), identity()]]))
}

fn eggplant_in_basket() -> TaskDescriptor {
    let sources = linspace_grid(
        Vector2::new(-0.105, 0.206),
        Vector2::new(0.01, 0.015),
        (2, 4),
    );
    TaskDescriptor::new(
        "PutEggplantInBasketScene-v0",
        EGGPLANT,
        SINK_TARGET,
        "put eggplant into yellow basket",
    )
    .with_layouts(with_fixed_target(&sources, Vector2::new(-0.125, 0.025)))
    .with_orientations(rows(&[
        [yaw(0.0), identity()],
        [yaw(FRAC_PI_4), identity()],
        [yaw(-FRAC_PI_4), identity()],
    ]))
    .with_evaluation(
        EvaluationConfig::default()
            .with_complete_placement(false)
            .with_vertical_offset_tolerance(0.06),
    )
    .with_max_episode_steps(120)
}

fn carrot_on_plate_distract() -> TaskDescriptor {
    four_object(
        "PutCarrotOnPlateInScene-distract",
        CARROT,
        PLATE,
        [SPOON, TOWEL],
        "put carrot on plate",
        &[
            [yaw(PI), identity(), identity(), identity()],
            [yaw(-FRAC_PI_2), identity(), yaw(FRAC_PI_2), identity()],
        ],
    )
}

fn spoon_on_towel_distract(name: &str, distractor: &str, instruction: &str) -> TaskDescriptor {
    four_object(
        name,
        SPOON,
        TOWEL,
        [CARROT, distractor],
        instruction,
        &[
            [identity(), identity(), yaw(PI), identity()],
            [yaw(FRAC_PI_2), identity(), yaw(-FRAC_PI_2), identity()],
        ],
    )
}

fn coke_can_on_plate() -> TaskDescriptor {
    two_object(
        "PutCokeCanOnPlateInScene-v2",
        COKE_CAN,
        PLATE,
        "put coke can on plate",
        &can_rows(),
    )
}

fn coke_can_on_plate_distract() -> TaskDescriptor {
    four_object(
        "PutCokeCanOnPlateInScene-distract",
        COKE_CAN,
        PLATE,
        [CARROT, PEPSI_CAN],
        "put coke can on plate",
        &[
            [roll(FRAC_PI_2), identity(), yaw(PI), roll(FRAC_PI_2)],
            [yaw(FRAC_PI_2), identity(), yaw(-FRAC_PI_2), yaw(FRAC_PI_2)],
        ],
    )
}

fn carrot_on_keyboard_distract() -> TaskDescriptor {
    four_object(
        "PutCarrotOnKeyboardInScene-distract",
        CARROT,
        KEYBOARD,
        [PLATE, SPOON],
        "put carrot on keyboard",
        &[
            [yaw(PI), identity(), identity(), identity()],
            [yaw(-FRAC_PI_2), identity(), identity(), identity()],
        ],
    )
}

/// Two-object scenes: the baseline put-on tasks plus the generalization set.
fn two_object_tasks() -> Vec<TaskDescriptor> {
    vec![
        spoon_on_towel(),
        carrot_on_plate(),
        stack_cubes("StackGreenCubeOnYellowCubeInScene-v0", GREEN_CUBE, YELLOW_CUBE),
        stack_cubes(
            "StackGreenCubeOnYellowCubeBakedTexInScene-v0",
            BAKED_GREEN_CUBE,
            BAKED_YELLOW_CUBE,
        ),
        eggplant_in_basket(),
        two_object(
            "PutGreenCubeOnPlateInScene-v2",
            BAKED_GREEN_CUBE,
            PLATE,
            "put green cube on plate",
            &[[identity(), identity()], [yaw(FRAC_PI_4), identity()]],
        ),
        two_object(
            "PutSmallPlateOnGreenCubeInScene-v2",
            SMALL_PLATE,
            BAKED_GREEN_CUBE,
            "put the small plate on the green cube",
            &[[identity(), identity()], [identity(), yaw(FRAC_PI_4)]],
        ),
        coke_can_on_plate(),
        two_object(
            "PutPepsiCanOnPlateInScene-v2",
            PEPSI_CAN,
            PLATE,
            "put pepsi can on plate",
            &can_rows(),
        ),
        two_object(
            "PutCarrotOnSpongeInScene-v2",
            CARROT,
            SPONGE,
            "put carrot on sponge",
            &carrot_rows(),
        ),
        two_object(
            "PutCarrotOnSpongeLargerInScene-v2",
            CARROT,
            LARGE_SPONGE,
            "put carrot on sponge",
            &carrot_rows(),
        ),
        two_object(
            "PutEggplantOnSpongeInScene-v2",
            EGGPLANT,
            SPONGE,
            "put eggplant on sponge",
            &eggplant_rows(),
        ),
        two_object(
            "PutEggplantOnSpongeLargerInScene-v2",
            EGGPLANT,
            LARGE_SPONGE,
            "put eggplant on sponge",
            &eggplant_rows(),
        ),
        two_object(
            "PutCarrotOnKeyboardInScene-v2",
            CARROT,
            KEYBOARD,
            "put carrot on keyboard",
            &carrot_rows(),
        ),
        two_object(
            "PutCokeCanOnKeyboardInScene-v2",
            COKE_CAN,
            KEYBOARD,
            "put coke can on keyboard",
            &can_rows(),
        ),
    ]
}

/// Scenes with two distractor objects on the remaining corners.
fn distractor_tasks() -> Vec<TaskDescriptor> {
    vec![
        spoon_on_towel_distract(
            "PutSpoonOnTableClothInScene-distract",
            PLATE,
            "put the spoon on the towel",
        ),
        carrot_on_plate_distract(),
        four_object(
            "PutEggplantOnPlateInScene-v1",
            EGGPLANT,
            PLATE,
            [CARROT, SPOON],
            "put the eggplant on the plate",
            &[
                [yaw(0.0), identity(), yaw(PI), identity()],
                [yaw(FRAC_PI_4), identity(), yaw(-FRAC_PI_2), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutEggplantOnCarrotInScene-v1",
            EGGPLANT,
            CARROT,
            [PLATE, SPOON],
            "Lay the eggplant on top of the carrot",
            &[
                [yaw(0.0), yaw(PI), identity(), identity()],
                [yaw(FRAC_PI_4), yaw(-FRAC_PI_2), identity(), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutCokeCanOnPlateInScene-v1",
            COKE_CAN,
            PLATE,
            [CARROT, SPOON],
            "put the coke can on the plate",
            &[
                [roll(FRAC_PI_2), identity(), yaw(PI), identity()],
                [yaw(FRAC_PI_2), identity(), yaw(-FRAC_PI_2), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutCarrotOnCokeCanInScene-v1",
            CARROT,
            COKE_CAN,
            [PLATE, SPOON],
            "Lay the carrot on the coke can",
            &[
                [yaw(PI), roll(FRAC_PI_2), identity(), identity()],
                [yaw(-FRAC_PI_2), roll(FRAC_PI_2), identity(), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutCarrotOnGreenCubeInScene-v1",
            CARROT,
            BAKED_GREEN_CUBE,
            [PLATE, SPOON],
            "Place the carrot on the green cube",
            &[
                [yaw(PI), identity(), identity(), identity()],
                [yaw(-FRAC_PI_2), identity(), identity(), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutPlateOnGreenCubeInScene-v1",
            PLATE,
            BAKED_GREEN_CUBE,
            [CARROT, SPOON],
            "Put the plate on the green cube",
            &[
                [identity(), identity(), yaw(PI), identity()],
                [identity(), identity(), yaw(-FRAC_PI_2), yaw(FRAC_PI_2)],
            ],
        ),
        four_object(
            "PutCokeCanOnPepsiCanInScene-v1",
            COKE_CAN,
            PEPSI_CAN,
            [PLATE, SPOON],
            "put the coke can on top of the pepsi can",
            &[
                [roll(FRAC_PI_2), roll(FRAC_PI_2), identity(), identity()],
                [yaw(FRAC_PI_2), roll(FRAC_PI_2), identity(), yaw(FRAC_PI_2)],
            ],
        ),
        coke_can_on_plate_distract(),
        carrot_on_keyboard_distract(),
        four_object(
            "PutCokeCanOnKeyboardInScene-distract",
            COKE_CAN,
            KEYBOARD,
            [PLATE, CARROT],
            "put coke can on keyboard",
            &[
                [roll(FRAC_PI_2), identity(), identity(), yaw(PI)],
                [yaw(FRAC_PI_2), identity(), identity(), yaw(PI)],
            ],
        ),
    ]
}

/// Same scenes, reworded instructions.
fn language_variants() -> Vec<TaskDescriptor> {
    let carrot = carrot_on_plate();
    let spoon = spoon_on_towel();
    let basket = eggplant_in_basket();
    let baked_stack = stack_cubes(
        "StackGreenCubeOnYellowCubeBakedTexInScene-v0",
        BAKED_GREEN_CUBE,
        BAKED_YELLOW_CUBE,
    );

    vec![
        carrot.rephrased(
            "PutCarrotOnPlateInScene-LangV1",
            "put rabbit's favorite vegetable on the plate",
        ),
        carrot.rephrased(
            "PutCarrotOnPlateInScene-LangV2",
            "pick up the carrot and drop it off on the plate",
        ),
        carrot_on_plate_distract().rephrased(
            "PutCarrotOnPlateInScene-LangV3",
            "put the carrot on the plate, not the towel",
        ),
        carrot
            .rephrased(
                "PutCarrotOnPlateInScene-LangV4",
                "pick up the carrot and drop it elsewhere on the table, not on the plate.",
            )
            .with_evaluation(EvaluationConfig::place_away()),
        four_object(
            "PutCarrotOnPlateInScene-LangV5",
            CARROT,
            PLATE,
            [EGGPLANT, RABBIT],
            "put rabbit's favorite vegetable on the plate",
            &[
                [yaw(PI), identity(), yaw(0.0), identity()],
                [yaw(-FRAC_PI_2), identity(), yaw(FRAC_PI_4), identity()],
            ],
        ),
        spoon.rephrased(
            "PutSpoonOnTableClothInScene-LangV1",
            "put the kitchenware for eating soup on the towel",
        ),
        spoon_on_towel_distract(
            "PutSpoonOnTableClothInScene-LangV2",
            SPONGE,
            "put the kitchenware for eating soup on the towel",
        ),
        spoon.rephrased(
            "PutSpoonOnTableClothInScene-LangV3",
            "pick up the spoon and drop it off on the towel",
        ),
        baked_stack.rephrased(
            "StackGreenCubeOnYellowCubeBakedTexInScene-LangV1",
            "pick up the green block and drop it on top of the yellow block",
        ),
        basket.rephrased(
            "PutEggplantInBasketScene-LangV1",
            "put the purple object into yellow basket",
        ),
        basket.rephrased(
            "PutEggplantInBasketScene-LangV2",
            "put eggplant into where the dishes usually get dried",
        ),
        basket.rephrased(
            "PutEggplantInBasketScene-LangV3",
            "pick up the eggplant and drop it off into the yellow basket",
        ),
        carrot_on_keyboard_distract().rephrased(
            "PutCarrotOnKeyboardInScene-LangV1",
            "put carrot on the tool used for typing words",
        ),
        coke_can_on_plate_distract().rephrased(
            "PutCokeCanOnPlateInScene-LangV1",
            "put coke can, not the carrot, not the pepsi can, on the plate",
        ),
        coke_can_on_plate().rephrased(
            "PutCokeCanOnPlateInScene-LangV3",
            "put the object that one needs the most when they are thirsty on plate",
        ),
    ]
}

/// Every built-in task.
pub(crate) fn builtin_tasks() -> Vec<TaskDescriptor> {
    let mut tasks = two_object_tasks();
    tasks.extend(distractor_tasks());
    tasks.extend(language_variants());
    tasks
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_every_builtin_validates() {
        for task in builtin_tasks() {
            if let Err(err) = task.validate() {
                panic!("{err}");
            }
        }
    }

    #[test]
    fn test_builtin_names_unique() {
        let tasks = builtin_tasks();
        let names: HashSet<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tasks.len());
        assert_eq!(tasks.len(), 42);
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(spoon_on_towel().num_episodes(), 24);
        assert_eq!(carrot_on_plate_distract().num_episodes(), 24);
        assert_eq!(eggplant_in_basket().num_episodes(), 24);
        let stack = stack_cubes("s", GREEN_CUBE, YELLOW_CUBE);
        assert_eq!(stack.layouts.len(), 24);
        assert_eq!(stack.num_episodes(), 24);
    }
}
