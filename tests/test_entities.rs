use balloon_shooter::compute::init_state;
use balloon_shooter::entities::*;

#[test]
fn entity_rects_use_fixed_sizes() {
    let bullet = Bullet { x: 10.0, y: 20.0 };
    assert_eq!(
        bullet.rect(),
        Rect {
            x: 10.0,
            y: 20.0,
            width: BULLET_SIZE,
            height: BULLET_SIZE,
        }
    );

    let balloon = Balloon {
        x: 1.0,
        y: 2.0,
        speed: 3.0,
        color: BalloonColor::Blue,
        kind: BalloonKind::Normal,
        points: NORMAL_POINTS,
    };
    assert_eq!(
        balloon.rect(),
        Rect {
            x: 1.0,
            y: 2.0,
            width: BALLOON_SIZE,
            height: BALLOON_SIZE,
        }
    );
}

#[test]
fn palette_excludes_special_gold() {
    assert_eq!(NORMAL_PALETTE.len(), 5);
    assert!(!NORMAL_PALETTE.contains(&BalloonColor::Gold));
}

#[test]
fn input_defaults_to_nothing_held() {
    let input = InputState::default();
    assert!(!input.left && !input.right && !input.fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.bullets.push(Bullet { x: 5.0, y: 5.0 });

    assert_eq!(original.player.x, 375.0);
    assert_eq!(original.score, 0);
    assert!(original.bullets.is_empty());
}
